//! Prompt loading.
//!
//! The grading instructions live in a UTF-8 text file next to the service (`PROMPT_PATH`) so they
//! can be tuned without a rebuild. The prompt defines the response conventions the `reporter`
//! parsers rely on (section headings, `Competência N` blocks, bold labels).

use crate::error::{AiError, AiResult};
use std::io::ErrorKind;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    text: String,
}

impl PromptTemplate {
    /// Read the prompt file at `path`.
    ///
    /// # Errors
    /// * [`AiError::PromptNotFound`] when the file does not exist.
    /// * [`AiError::Io`] for any other read failure, including invalid UTF-8.
    pub fn load(path: impl AsRef<Path>) -> AiResult<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => {
                tracing::debug!(path = %path.display(), chars = text.chars().count(), "prompt loaded");
                Ok(Self { text })
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(AiError::PromptNotFound(path.display().to_string()))
            }
            Err(e) => Err(AiError::Io(format!("{}: {e}", path.display()))),
        }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
