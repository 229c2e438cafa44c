//! Knowledge base infrastructure: the in-process vector index and the
//! document-backed retriever built on top of it

mod store;
mod vector_index;

pub use store::{BuildOptions, DocumentKnowledgeBase, DEFAULT_EMBED_BATCH_SIZE};
pub use vector_index::InMemoryVectorIndex;
