//!
//! # Document Strategy Trait
//!
//! This module defines the [`DocumentStrategy`] trait, the seam between the report builder and the
//! different ways of producing the `.docx` (generated from scratch, or filled into a template).
//!
//! # Example
//!
//! ```rust
//! use reporter::error::ReportResult;
//! use reporter::traits::strategy::DocumentStrategy;
//! use reporter::types::StructuredAnalysis;
//!
//! struct Empty;
//!
//! impl DocumentStrategy for Empty {
//!     fn name(&self) -> &'static str {
//!         "empty"
//!     }
//!
//!     fn render(&self, _analysis: &StructuredAnalysis, _raw: &str) -> ReportResult<Vec<u8>> {
//!         Ok(Vec::new())
//!     }
//! }
//! ```

use crate::error::ReportResult;
use crate::types::StructuredAnalysis;

/// Produces the bytes of a `.docx` report from a parsed analysis.
///
/// Implementations must not keep state between calls; the builder shares one instance across
/// threads.
pub trait DocumentStrategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Render the report.
    ///
    /// # Arguments
    /// - `analysis`: The fields parsed from the AI response.
    /// - `raw`: The unparsed AI response, for strategies that want to embed it.
    ///
    /// # Returns
    /// - `Ok(Vec<u8>)`: The `.docx` bytes.
    /// - `Err(ReportError)`: If a resource is missing or the document cannot be assembled.
    fn render(&self, analysis: &StructuredAnalysis, raw: &str) -> ReportResult<Vec<u8>>;
}
