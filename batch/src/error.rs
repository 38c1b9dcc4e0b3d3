use std::path::PathBuf;

pub type BatchResult<T> = Result<T, BatchError>;

/// Errors that stop a whole batch, or a single essay within it.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Template not found: {0}")]
    TemplateNotFound(PathBuf),
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unsupported essay file: {0}")]
    UnsupportedFile(String),
}

impl BatchError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BatchError::Io {
            path: path.into(),
            source,
        }
    }
}
