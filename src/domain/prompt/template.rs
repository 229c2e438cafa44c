//! Prompt template parsing and rendering
//!
//! Placeholders use the `${var:name}` syntax. Every placeholder is required
//! at render time; values are inserted verbatim.

use std::collections::{BTreeSet, HashMap};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

static VARIABLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{var:([a-zA-Z0-9][-_a-zA-Z0-9]*)\}").expect("variable pattern is valid")
});

/// Grounded question-answering prompt for the document-QA branch
pub const DOCUMENT_QA_PROMPT: &str = "
Answer the question based only on the provided context.
Be concise and accurate.

Context: ${var:context}

Question: ${var:input}

Answer:";

/// Template processing errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Missing required variable: {name}")]
    MissingVariable { name: String },

    #[error("Template has no variables: {content}")]
    NoVariables { content: String },
}

/// A parsed prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    content: String,
    variables: BTreeSet<String>,
}

impl PromptTemplate {
    /// Parse a template string and collect its variable names
    pub fn parse(content: impl Into<String>) -> Result<Self, TemplateError> {
        let content = content.into();
        let variables: BTreeSet<String> = VARIABLE_PATTERN
            .captures_iter(&content)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .collect();

        if variables.is_empty() {
            return Err(TemplateError::NoVariables { content });
        }

        Ok(Self { content, variables })
    }

    /// The grounded document-QA template
    pub fn document_qa() -> Self {
        Self::parse(DOCUMENT_QA_PROMPT).expect("document QA prompt has variables")
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(String::as_str)
    }

    /// Render the template, failing on the first missing variable
    pub fn render(&self, values: &HashMap<&str, String>) -> Result<String, TemplateError> {
        if let Some(missing) = self.variables().find(|name| !values.contains_key(name)) {
            return Err(TemplateError::MissingVariable {
                name: missing.to_string(),
            });
        }

        let rendered = VARIABLE_PATTERN.replace_all(&self.content, |cap: &Captures<'_>| {
            values
                .get(&cap[1])
                .cloned()
                .unwrap_or_default()
        });

        Ok(rendered.into_owned())
    }
}
