//! PDF document parser

use async_trait::async_trait;
use lopdf::Document as PdfDocument;
use tracing::{debug, warn};

use crate::domain::ingestion::{
    DocumentMetadata, DocumentParser, PageText, ParsedDocument, ParserInput,
};
use crate::domain::DomainError;

/// Extracts text page by page with lopdf, falling back to pdf-extract
/// when lopdf yields nothing
#[derive(Debug, Clone, Default)]
pub struct PdfParser;

impl PdfParser {
    pub fn new() -> Self {
        Self
    }

    fn extract_title(pdf: &PdfDocument) -> Option<String> {
        let (_, info) = pdf
            .trailer
            .get(b"Info")
            .and_then(|obj| pdf.dereference(obj))
            .ok()?;
        let title = info.as_dict().ok()?.get(b"Title").ok()?.as_str().ok()?;
        let title = String::from_utf8_lossy(title).trim().to_string();

        (!title.is_empty()).then_some(title)
    }

    fn extract_pages(pdf: &PdfDocument) -> Vec<PageText> {
        pdf.get_pages()
            .keys()
            .map(|&number| {
                let text = pdf.extract_text(&[number]).unwrap_or_else(|e| {
                    warn!(page = number, error = %e, "Failed to extract page text");
                    String::new()
                });
                PageText::new(number, text)
            })
            .collect()
    }

    fn parse_bytes(bytes: &[u8]) -> Result<(Vec<PageText>, Option<String>), DomainError> {
        let pdf = PdfDocument::load_mem(bytes)
            .map_err(|e| DomainError::ingestion(format!("Failed to load PDF: {}", e)))?;

        let title = Self::extract_title(&pdf);
        let mut pages = Self::extract_pages(&pdf);

        if pages.iter().all(|p| p.text.trim().is_empty()) {
            debug!("lopdf produced no text, falling back to pdf-extract");
            let text = pdf_extract::extract_text_from_mem(bytes)
                .map_err(|e| DomainError::ingestion(format!("Failed to extract PDF text: {}", e)))?;

            pages = text
                .split('\x0c')
                .enumerate()
                .map(|(i, page)| PageText::new(i as u32 + 1, page))
                .collect();
        }

        Ok((pages, title))
    }
}

#[async_trait]
impl DocumentParser for PdfParser {
    fn supported_mime_types(&self) -> &[&str] {
        &["application/pdf"]
    }

    async fn parse(&self, input: ParserInput) -> Result<ParsedDocument, DomainError> {
        debug!(bytes = input.content.len(), "Parsing PDF document");

        let content = input.content;
        let (pages, title) = tokio::task::spawn_blocking(move || Self::parse_bytes(&content))
            .await
            .map_err(|e| DomainError::internal(format!("PDF parsing task failed: {}", e)))??;

        let mut metadata = DocumentMetadata::new().with_mime_type("application/pdf");

        if let Some(title) = title {
            metadata = metadata.with_title(title);
        }

        if let Some(filename) = input.filename {
            metadata = metadata.with_source(filename);
        }

        Ok(ParsedDocument::new(pages, metadata))
    }
}
