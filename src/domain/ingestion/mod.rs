//! Document ingestion domain types and traits
//!
//! - `DocumentParser` turns raw file bytes into page texts
//! - `ChunkingStrategy` splits page text into overlapping windows

pub mod chunker;
pub mod parser;

pub use chunker::{Chunk, ChunkMetadata, ChunkingConfig, ChunkingStrategy};
pub use parser::{DocumentMetadata, DocumentParser, PageText, ParsedDocument, ParserInput};
