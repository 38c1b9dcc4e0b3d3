//! # Reporter Library
//!
//! This crate turns the semi-structured text an AI model returns for a handwritten essay into a
//! formatted `.docx` correction report.
//!
//! ## Key Concepts
//! - **Parsers**: Tolerant extraction of sections, the student name and the per-criterion blocks
//!   (score, analysis, flagged excerpts) into a [`types::StructuredAnalysis`]. Missing content is an
//!   empty value, never an error.
//! - **Highlighting**: Flagged excerpts are located in the transcription with whitespace and case
//!   tolerant matching and marked with the criterion's palette color.
//! - **Builder**: Produces the document with a configurable strategy (generated from scratch or
//!   filled into a `.docx` template) and falls back to a plain document carrying the raw response
//!   when the strategy fails.
//! - **docx**: A small WordprocessingML model, writer and template engine on top of `zip` and
//!   `quick-xml`.

pub mod builder;
pub mod docx;
pub mod error;
pub mod highlight;
pub mod naming;
pub mod palette;
pub mod parsers;
pub mod traits;
pub mod types;

pub use builder::{Report, ReportBuilder, ReportStatus, ReportStrategy};
pub use error::{ReportError, ReportResult};
pub use parsers::analysis_parser::parse_analysis;
pub use types::{CriterionResult, NAME_SENTINEL, StructuredAnalysis};
