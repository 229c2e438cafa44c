//! Document parser trait and types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::DomainError;

/// Raw file handed to a parser
#[derive(Debug, Clone)]
pub struct ParserInput {
    pub content: Vec<u8>,
    pub filename: Option<String>,
}

impl ParserInput {
    pub fn from_bytes(content: impl Into<Vec<u8>>) -> Self {
        Self {
            content: content.into(),
            filename: None,
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

/// Text of one page, numbered from 1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    pub number: u32,
    pub text: String,
}

impl PageText {
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// Metadata extracted from a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl DocumentMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// A parsed document, split into pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    pub pages: Vec<PageText>,
    pub metadata: DocumentMetadata,
}

impl ParsedDocument {
    pub fn new(pages: Vec<PageText>, metadata: DocumentMetadata) -> Self {
        Self { pages, metadata }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// True when no page carries any non-whitespace text
    pub fn is_blank(&self) -> bool {
        self.pages.iter().all(|p| p.text.trim().is_empty())
    }
}

/// Trait for document parsers
#[async_trait]
pub trait DocumentParser: Send + Sync + Debug {
    fn supported_mime_types(&self) -> &[&str];

    async fn parse(&self, input: ParserInput) -> Result<ParsedDocument, DomainError>;
}
