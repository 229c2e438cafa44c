//! Chunking strategy implementations

mod recursive;

pub use recursive::{RecursiveChunker, DEFAULT_SEPARATORS};
