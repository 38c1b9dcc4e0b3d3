//! # Parsers
//!
//! Best-effort extraction of structured fields from the semi-structured text returned by the AI.
//! Every stage is total: missing content is reported as an empty value, never as an error.
//!
//! - [`section_parser`]: heading-delimited sections and the student name.
//! - [`criteria_parser`]: per-competency score, analysis and flagged excerpts.
//! - [`analysis_parser`]: assembles the full [`crate::types::StructuredAnalysis`].

pub mod analysis_parser;
pub mod criteria_parser;
pub mod section_parser;
