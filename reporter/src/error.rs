//! Report Error Types
//!
//! This module defines the [`ReportError`] enum, which covers every failure that can occur while
//! turning a parsed analysis into a `.docx` report. Extraction of sections from the AI response never
//! fails (absent sections are empty strings), so these errors only describe resource and document
//! construction problems.
//!
//! # Usage
//!
//! ```rust
//! use reporter::error::{ReportError, ReportResult};
//!
//! fn load(path: &str, exists: bool) -> ReportResult<()> {
//!     if !exists {
//!         return Err(ReportError::TemplateNotFound(path.to_string()));
//!     }
//!     Ok(())
//! }
//!
//! assert!(load("template.docx", false).unwrap_err().is_template_not_found());
//! ```

pub type ReportResult<T> = Result<T, ReportError>;

/// Represents all error types that can occur while building a report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    /// The template resource required by the template-fill strategy does not exist.
    #[error("Template not found: {0}")]
    TemplateNotFound(String),
    /// Any other failure while assembling the document.
    #[error("Failed to build report: {0}")]
    Construction(String),
    /// A document part could not be parsed as XML.
    #[error("Malformed document XML: {0}")]
    Xml(String),
    /// The `.docx` container could not be read or written.
    #[error("Failed to package document: {0}")]
    Package(String),
}

impl ReportError {
    pub fn is_template_not_found(&self) -> bool {
        matches!(self, ReportError::TemplateNotFound(_))
    }
}

impl From<zip::result::ZipError> for ReportError {
    fn from(e: zip::result::ZipError) -> Self {
        ReportError::Package(e.to_string())
    }
}

impl From<std::io::Error> for ReportError {
    fn from(e: std::io::Error) -> Self {
        ReportError::Construction(e.to_string())
    }
}
