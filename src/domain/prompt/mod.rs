//! Prompt templates

mod template;

pub use template::{PromptTemplate, TemplateError, DOCUMENT_QA_PROMPT};
