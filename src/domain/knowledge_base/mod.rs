//! Knowledge base domain - passages and similarity retrieval

mod passage;
mod retriever;

pub use passage::{Passage, RetrievedPassage};
pub use retriever::{PassageRetriever, SearchParams, DEFAULT_TOP_K};

#[cfg(test)]
pub use retriever::MockPassageRetriever;
