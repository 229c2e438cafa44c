//! City extraction for the weather branch

/// Words after which the rest of the query is taken as the city
pub const CITY_INDICATORS: [&str; 4] = ["weather", "in", "for", "at"];

/// City used when the query has no words at all
pub const DEFAULT_CITY: &str = "London";

fn is_indicator(word: &str) -> bool {
    CITY_INDICATORS
        .iter()
        .any(|indicator| word.eq_ignore_ascii_case(indicator))
}

/// Pull a city name out of a free-text weather query.
///
/// The first indicator word that is followed by a non-indicator word starts
/// the city; everything after it is joined with single spaces. Without such a
/// word the last word is used, and an empty query yields [`DEFAULT_CITY`].
pub fn extract_city(query: &str) -> String {
    let words: Vec<&str> = query.split_whitespace().collect();

    let start = words
        .windows(2)
        .position(|pair| is_indicator(pair[0]) && !is_indicator(pair[1]));

    match (start, words.last()) {
        (Some(i), _) => words[i + 1..].join(" "),
        (None, Some(last)) => (*last).to_string(),
        (None, None) => DEFAULT_CITY.to_string(),
    }
}
