//! # Batch Library
//!
//! Corrects every essay photo found in a folder: each image is analysed, its report is built and the
//! `.docx` is written next to the others in an output folder. One failing essay is logged and skipped;
//! the run carries on with the rest.

pub mod error;
pub mod runner;
pub mod store;

pub use error::{BatchError, BatchResult};
pub use runner::{BatchFailure, BatchRunner, BatchSummary};
pub use store::{EssayItem, EssayStore, LocalDirStore};
