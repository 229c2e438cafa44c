//! Recursive character splitting strategy

use std::ops::Range;

use crate::domain::ingestion::{Chunk, ChunkMetadata, ChunkingConfig, ChunkingStrategy};
use crate::domain::DomainError;

/// Separators tried in order: paragraphs, lines, words, characters
pub const DEFAULT_SEPARATORS: &[&str] = &["\n\n", "\n", " ", ""];

/// Splits text at the coarsest separator that yields pieces within
/// `chunk_size`, then merges neighbouring pieces into windows that share
/// up to `chunk_overlap` characters.
///
/// Every window is a contiguous slice of the input, so the character
/// offsets in [`ChunkMetadata`] index straight back into it.
#[derive(Debug, Clone)]
pub struct RecursiveChunker {
    separators: Vec<Vec<char>>,
}

impl RecursiveChunker {
    pub fn new() -> Self {
        Self::with_separators(DEFAULT_SEPARATORS)
    }

    pub fn with_separators(separators: &[&str]) -> Self {
        Self {
            separators: separators.iter().map(|s| s.chars().collect()).collect(),
        }
    }

    /// Cuts `range` into contiguous pieces no longer than `max_len`; each
    /// separator stays attached to the piece that follows it.
    fn split(
        &self,
        text: &[char],
        range: Range<usize>,
        level: usize,
        max_len: usize,
        out: &mut Vec<Range<usize>>,
    ) {
        if range.len() <= max_len {
            out.push(range);
            return;
        }

        let Some((separator, next_level)) = self.separators[level..]
            .iter()
            .enumerate()
            .find(|(_, sep)| sep.is_empty() || contains(&text[range.clone()], sep))
            .map(|(offset, sep)| (sep, level + offset + 1))
        else {
            out.extend(range.map(|i| i..i + 1));
            return;
        };

        if separator.is_empty() {
            out.extend(range.map(|i| i..i + 1));
            return;
        }

        let mut start = range.start;
        let mut i = range.start + 1;
        while i + separator.len() <= range.end {
            if text[i..i + separator.len()] == separator[..] {
                self.split(text, start..i, next_level, max_len, out);
                start = i;
                i += separator.len();
            } else {
                i += 1;
            }
        }
        self.split(text, start..range.end, next_level, max_len, out);
    }
}

impl Default for RecursiveChunker {
    fn default() -> Self {
        Self::new()
    }
}

fn contains(haystack: &[char], needle: &[char]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

/// Shrinks `range` past leading and trailing whitespace
fn trim_range(text: &[char], mut range: Range<usize>) -> Range<usize> {
    while range.start < range.end && text[range.start].is_whitespace() {
        range.start += 1;
    }
    while range.end > range.start && text[range.end - 1].is_whitespace() {
        range.end -= 1;
    }
    range
}

impl ChunkingStrategy for RecursiveChunker {
    fn chunk(&self, content: &str, config: &ChunkingConfig) -> Result<Vec<Chunk>, DomainError> {
        config.validate()?;

        let text: Vec<char> = content.chars().collect();
        if text.iter().all(|c| c.is_whitespace()) {
            return Ok(vec![]);
        }

        let mut pieces = Vec::new();
        self.split(&text, 0..text.len(), 0, config.chunk_size, &mut pieces);

        let mut windows: Vec<Range<usize>> = Vec::new();
        let mut current: std::collections::VecDeque<Range<usize>> = Default::default();
        let mut current_len = 0;

        for piece in pieces {
            if current_len + piece.len() > config.chunk_size && !current.is_empty() {
                if let (Some(first), Some(last)) = (current.front(), current.back()) {
                    windows.push(first.start..last.end);
                }

                while current_len > config.chunk_overlap
                    || (current_len + piece.len() > config.chunk_size && current_len > 0)
                {
                    match current.pop_front() {
                        Some(dropped) => current_len -= dropped.len(),
                        None => break,
                    }
                }
            }

            current_len += piece.len();
            current.push_back(piece);
        }

        if let (Some(first), Some(last)) = (current.front(), current.back()) {
            windows.push(first.start..last.end);
        }

        let chunks = windows
            .into_iter()
            .map(|window| trim_range(&text, window))
            .filter(|window| !window.is_empty())
            .enumerate()
            .map(|(index, window)| {
                let content: String = text[window.clone()].iter().collect();
                Chunk::new(content, ChunkMetadata::new(index, window.start, window.end))
            })
            .collect();

        Ok(chunks)
    }

    fn name(&self) -> &'static str {
        "recursive"
    }
}
