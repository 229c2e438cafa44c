//! Text windows stored in, and returned from, the knowledge base

use serde::{Deserialize, Serialize};

/// A window of document text with its position in the source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    /// Window text
    pub text: String,
    /// Path of the document the window came from
    pub source: String,
    /// 1-based page number
    pub page: u32,
    /// Character offset of the window within its page
    pub char_start: usize,
    /// Character offset one past the window's end
    pub char_end: usize,
    /// Position of the window among all windows of the corpus
    pub chunk_index: usize,
}

impl Passage {
    pub fn new(text: impl Into<String>, source: impl Into<String>, page: u32) -> Self {
        let text = text.into();
        let char_end = text.chars().count();

        Self {
            text,
            source: source.into(),
            page,
            char_start: 0,
            char_end,
            chunk_index: 0,
        }
    }

    pub fn with_offsets(mut self, char_start: usize, char_end: usize) -> Self {
        self.char_start = char_start;
        self.char_end = char_end;
        self
    }

    pub fn with_chunk_index(mut self, chunk_index: usize) -> Self {
        self.chunk_index = chunk_index;
        self
    }
}

/// A passage returned by a similarity search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedPassage {
    #[serde(flatten)]
    pub passage: Passage,
    /// Cosine similarity to the query (1.0 = same direction)
    pub score: f32,
}

impl RetrievedPassage {
    pub fn new(passage: Passage, score: f32) -> Self {
        Self { passage, score }
    }

    pub fn text(&self) -> &str {
        &self.passage.text
    }

    /// Cosine distance to the query; results are ordered by this ascending
    pub fn distance(&self) -> f32 {
        1.0 - self.score
    }
}
