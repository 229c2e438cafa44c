//! Exact cosine-similarity index held in memory

use crate::domain::embedding::cosine_similarity;
use crate::domain::knowledge_base::{Passage, RetrievedPassage};
use crate::domain::DomainError;

#[derive(Debug, Clone)]
struct IndexEntry {
    passage: Passage,
    vector: Vec<f32>,
}

/// Brute-force nearest-neighbour index over fixed-dimension vectors
#[derive(Debug, Clone)]
pub struct InMemoryVectorIndex {
    dimensions: usize,
    entries: Vec<IndexEntry>,
}

impl InMemoryVectorIndex {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            entries: Vec::new(),
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn check_dimensions(&self, vector: &[f32]) -> Result<(), DomainError> {
        if vector.len() != self.dimensions {
            return Err(DomainError::knowledge_base(format!(
                "Vector has {} dimensions, index expects {}",
                vector.len(),
                self.dimensions
            )));
        }
        Ok(())
    }

    pub fn insert(&mut self, passage: Passage, vector: Vec<f32>) -> Result<(), DomainError> {
        self.check_dimensions(&vector)?;
        self.entries.push(IndexEntry { passage, vector });
        Ok(())
    }

    /// Up to `top_k` passages by descending cosine similarity; equal
    /// scores keep insertion order
    pub fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<RetrievedPassage>, DomainError> {
        self.check_dimensions(query)?;

        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (i, cosine_similarity(query, &entry.vector)))
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        Ok(scored
            .into_iter()
            .take(top_k)
            .map(|(i, score)| RetrievedPassage::new(self.entries[i].passage.clone(), score))
            .collect())
    }
}
