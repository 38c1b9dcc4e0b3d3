//! Where essays come from and where reports go.
//!
//! [`EssayStore`] keeps the runner independent of the storage. [`LocalDirStore`] reads the images of
//! one folder and writes the reports into another.

use crate::error::{BatchError, BatchResult};
use std::fs;
use std::path::{Path, PathBuf};
use util::paths::{ensure_dir, has_extension};

/// Image extensions picked up from the input folder.
pub const ESSAY_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// One essay waiting to be corrected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EssayItem {
    /// File name within the store, also used in logs.
    pub name: String,
}

pub trait EssayStore: Send + Sync {
    /// Every essay available, in a stable order.
    fn list(&self) -> BatchResult<Vec<EssayItem>>;

    /// The image bytes of `item`.
    fn fetch(&self, item: &EssayItem) -> BatchResult<Vec<u8>>;

    /// Save a finished report and return where it went.
    fn store(&self, file_name: &str, bytes: &[u8]) -> BatchResult<PathBuf>;
}

#[derive(Debug, Clone)]
pub struct LocalDirStore {
    input: PathBuf,
    output: PathBuf,
}

impl LocalDirStore {
    /// Opens the store, creating `output` if needed.
    ///
    /// # Errors
    /// * `BatchError::Io` if `input` is not a readable directory or `output` cannot be created.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> BatchResult<Self> {
        let input = input.into();
        if !input.is_dir() {
            return Err(BatchError::io(
                &input,
                std::io::Error::new(std::io::ErrorKind::NotFound, "input folder does not exist"),
            ));
        }
        let output = output.into();
        ensure_dir(&output).map_err(|e| BatchError::io(&output, e))?;
        Ok(Self { input, output })
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// `file_name` in the output folder, suffixed `_2`, `_3`, ... when taken, so two students with
    /// the same name do not overwrite each other.
    fn free_path(&self, file_name: &str) -> PathBuf {
        let candidate = self.output.join(file_name);
        if !candidate.exists() {
            return candidate;
        }
        let (stem, ext) = match file_name.rsplit_once('.') {
            Some((stem, ext)) => (stem, format!(".{ext}")),
            None => (file_name, String::new()),
        };
        (2..)
            .map(|n| self.output.join(format!("{stem}_{n}{ext}")))
            .find(|path| !path.exists())
            .unwrap_or(candidate)
    }
}

impl EssayStore for LocalDirStore {
    fn list(&self) -> BatchResult<Vec<EssayItem>> {
        let entries = fs::read_dir(&self.input).map_err(|e| BatchError::io(&self.input, e))?;

        let mut items: Vec<EssayItem> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && has_extension(path, ESSAY_EXTENSIONS))
            .filter_map(|path| {
                let name = path.file_name()?.to_str()?.to_string();
                Some(EssayItem { name })
            })
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    fn fetch(&self, item: &EssayItem) -> BatchResult<Vec<u8>> {
        let path = self.input.join(&item.name);
        fs::read(&path).map_err(|e| BatchError::io(path, e))
    }

    fn store(&self, file_name: &str, bytes: &[u8]) -> BatchResult<PathBuf> {
        let path = self.free_path(file_name);
        fs::write(&path, bytes).map_err(|e| BatchError::io(&path, e))?;
        Ok(path)
    }
}
