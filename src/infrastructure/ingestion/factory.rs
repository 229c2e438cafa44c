//! Parser selection by file type

use std::path::Path;
use std::sync::Arc;

use crate::domain::ingestion::DocumentParser;
use crate::domain::DomainError;

use super::parsers::{PdfParser, PlainTextParser};

/// Factory for creating document parsers
#[derive(Debug, Default)]
pub struct ParserFactory;

impl ParserFactory {
    /// Create a parser for the given MIME type
    pub fn create(mime_type: &str) -> Result<Arc<dyn DocumentParser>, DomainError> {
        let parsers: [Arc<dyn DocumentParser>; 2] =
            [Arc::new(PdfParser::new()), Arc::new(PlainTextParser::new())];

        parsers
            .into_iter()
            .find(|parser| parser.supported_mime_types().contains(&mime_type))
            .ok_or_else(|| {
                DomainError::validation(format!("Unsupported document type: {}", mime_type))
            })
    }

    /// Guess the MIME type from the file extension
    pub fn detect_mime(path: &Path) -> Option<String> {
        mime_guess::from_path(path)
            .first()
            .map(|mime| mime.essence_str().to_string())
    }

    /// Create a parser for the file at `path`
    pub fn for_path(path: &Path) -> Result<Arc<dyn DocumentParser>, DomainError> {
        let mime_type = Self::detect_mime(path).ok_or_else(|| {
            DomainError::validation(format!(
                "Cannot determine document type of {}",
                path.display()
            ))
        })?;

        Self::create(&mime_type)
    }

    pub fn supported_mime_types() -> Vec<&'static str> {
        vec!["application/pdf", "text/plain", "text/markdown", "text/x-markdown"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_mime() {
        assert_eq!(
            ParserFactory::detect_mime(Path::new("LogicLoom_Company_Profile_Healthcare.pdf")).as_deref(),
            Some("application/pdf")
        );
        assert_eq!(
            ParserFactory::detect_mime(Path::new("notes.txt")).as_deref(),
            Some("text/plain")
        );
        assert_eq!(ParserFactory::detect_mime(Path::new("no_extension")), None);
    }

    #[test]
    fn test_for_path_selects_parser() {
        let parser = ParserFactory::for_path(Path::new("profile.pdf")).unwrap();
        assert!(parser.supported_mime_types().contains(&"application/pdf"));

        let parser = ParserFactory::for_path(Path::new("README.md")).unwrap();
        assert!(parser.supported_mime_types().contains(&"text/markdown"));
    }

    #[test]
    fn test_unsupported_type() {
        let result = ParserFactory::for_path(Path::new("photo.png"));
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }
}
