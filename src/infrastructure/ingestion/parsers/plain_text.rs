//! Plain text and markdown parser

use async_trait::async_trait;

use crate::domain::ingestion::{
    DocumentMetadata, DocumentParser, PageText, ParsedDocument, ParserInput,
};
use crate::domain::DomainError;

/// Parser for UTF-8 text files; form feeds separate pages
#[derive(Debug, Clone, Default)]
pub struct PlainTextParser;

impl PlainTextParser {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentParser for PlainTextParser {
    fn supported_mime_types(&self) -> &[&str] {
        &["text/plain", "text/markdown", "text/x-markdown"]
    }

    async fn parse(&self, input: ParserInput) -> Result<ParsedDocument, DomainError> {
        let content = String::from_utf8(input.content)
            .map_err(|e| DomainError::ingestion(format!("Document is not valid UTF-8: {}", e)))?;

        let pages = content
            .split('\x0c')
            .enumerate()
            .map(|(i, text)| PageText::new(i as u32 + 1, text))
            .collect();

        let mut metadata = DocumentMetadata::new().with_mime_type("text/plain");

        if let Some(filename) = input.filename {
            metadata = metadata.with_source(filename);
        }

        Ok(ParsedDocument::new(pages, metadata))
    }
}
