//! # Report Builder
//!
//! Turns a parsed analysis into a downloadable `.docx` [`Report`].
//!
//! The layout is delegated to a [`DocumentStrategy`] chosen by configuration:
//!
//! - [`generative::GenerativeStrategy`]: composes the document from scratch.
//! - [`template_fill::TemplateFillStrategy`]: fills the placeholders of a `.docx` template.
//!
//! A failing strategy never leaves the caller without a file. The builder catches the error, emits
//! the [`fallback`] document instead and records the error in [`ReportStatus::Fallback`], so callers
//! can still tell a missing template apart from any other construction failure.
//!
//! ## Example
//!
//! ```rust
//! use reporter::builder::{ReportBuilder, ReportStrategy};
//!
//! let builder = ReportBuilder::new(ReportStrategy::Generative);
//! let report = builder
//!     .build_from_text("### Nome do Aluno\nMaria Silva\n### Nota Estimada\n880")
//!     .unwrap();
//! assert_eq!(report.file_name, "correcao_Maria_Silva.docx");
//! assert!(report.status.is_complete());
//! ```

pub mod fallback;
pub mod generative;
pub mod template_fill;

use crate::error::{ReportError, ReportResult};
use crate::naming::report_file_name;
use crate::parsers::analysis_parser::parse_analysis;
use crate::traits::strategy::DocumentStrategy;
use crate::types::StructuredAnalysis;
use generative::GenerativeStrategy;
use std::path::PathBuf;
use template_fill::TemplateFillStrategy;
use util::config::{AppConfig, StrategyKind};

/// Which layout the builder uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportStrategy {
    Generative,
    TemplateFill { template_path: PathBuf },
}

impl ReportStrategy {
    pub fn from_config(config: &AppConfig) -> Self {
        match config.report_strategy {
            StrategyKind::Generative => ReportStrategy::Generative,
            StrategyKind::Template => ReportStrategy::TemplateFill {
                template_path: config.template_path.clone(),
            },
        }
    }
}

/// Outcome of a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportStatus {
    /// The configured strategy produced the document.
    Complete,
    /// The strategy failed with the given error and the fallback document was produced.
    Fallback(ReportError),
}

impl ReportStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, ReportStatus::Complete)
    }

    pub fn error(&self) -> Option<&ReportError> {
        match self {
            ReportStatus::Complete => None,
            ReportStatus::Fallback(e) => Some(e),
        }
    }

    /// `complete` or `fallback`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Complete => "complete",
            ReportStatus::Fallback(_) => "fallback",
        }
    }
}

/// A finished report, ready to be written or sent.
#[derive(Debug, Clone)]
pub struct Report {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub status: ReportStatus,
}

pub struct ReportBuilder {
    strategy: Box<dyn DocumentStrategy>,
}

impl ReportBuilder {
    pub fn new(strategy: ReportStrategy) -> Self {
        match strategy {
            ReportStrategy::Generative => Self::with_strategy(GenerativeStrategy),
            ReportStrategy::TemplateFill { template_path } => {
                Self::with_strategy(TemplateFillStrategy::new(template_path))
            }
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(ReportStrategy::from_config(config))
    }

    /// Use a custom layout.
    pub fn with_strategy<S: DocumentStrategy + 'static>(strategy: S) -> Self {
        Self {
            strategy: Box::new(strategy),
        }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Build the report for an already parsed analysis.
    ///
    /// # Arguments
    /// * `analysis` - Fields parsed from `raw`.
    /// * `raw` - The unparsed AI response, embedded verbatim in the fallback document.
    ///
    /// # Returns
    /// * `Ok(Report)` with [`ReportStatus::Complete`], or with [`ReportStatus::Fallback`] when the
    ///   strategy failed.
    /// * `Err(ReportError)` only if the fallback document itself cannot be packaged.
    pub fn build(&self, analysis: &StructuredAnalysis, raw: &str) -> ReportResult<Report> {
        let file_name = report_file_name(analysis.student_name.as_deref());

        match self.strategy.render(analysis, raw) {
            Ok(bytes) => {
                tracing::info!(
                    strategy = self.strategy.name(),
                    file = %file_name,
                    size = bytes.len(),
                    "report built"
                );
                Ok(Report {
                    bytes,
                    file_name,
                    status: ReportStatus::Complete,
                })
            }
            Err(error) => {
                tracing::error!(
                    strategy = self.strategy.name(),
                    error = %error,
                    "report strategy failed, emitting fallback document"
                );
                let bytes = fallback::render_fallback(&error, raw)?;
                Ok(Report {
                    bytes,
                    file_name,
                    status: ReportStatus::Fallback(error),
                })
            }
        }
    }

    /// Parse `raw` and build its report.
    pub fn build_from_text(&self, raw: &str) -> ReportResult<Report> {
        self.build(&parse_analysis(raw), raw)
    }
}

impl std::fmt::Debug for ReportBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportBuilder")
            .field("strategy", &self.strategy.name())
            .finish()
    }
}
