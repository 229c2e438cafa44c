//! Document ingestion infrastructure
//!
//! Parsers turn the source file into pages; the chunker cuts pages into
//! overlapping passages.

pub mod chunkers;
pub mod factory;
pub mod parsers;

pub use chunkers::RecursiveChunker;
pub use factory::ParserFactory;
pub use parsers::{PdfParser, PlainTextParser};
