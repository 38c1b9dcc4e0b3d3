//! Sequential batch correction.
//!
//! Every essay goes through four steps, each logged:
//!
//! 1. fetch the image from the store
//! 2. analyse it with the AI service
//! 3. build the report
//! 4. store the `.docx`
//!
//! A failure in any step skips that essay only. An essay whose report fell back because the template
//! is missing is skipped too, so the output folder never fills up with fallback documents; the
//! template is also checked once before the first essay.

use crate::error::{BatchError, BatchResult};
use crate::store::{EssayItem, EssayStore};
use ai::{EssayAnalyzer, mime_for_path, preprocess_image, sniff_mime};
use reporter::{ReportBuilder, ReportStatus, ReportStrategy};
use std::path::PathBuf;
use std::sync::Arc;

/// An essay that produced no report, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub essay: String,
    pub reason: String,
}

/// Outcome of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Essays whose report was stored.
    pub processed: usize,
    /// Essays skipped after a failure; `failures` says why.
    pub skipped: usize,
    pub failures: Vec<BatchFailure>,
    /// Where each stored report went, in processing order.
    pub reports: Vec<PathBuf>,
}

impl BatchSummary {
    fn skip(&mut self, item: &EssayItem, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::warn!(essay = %item.name, reason = %reason, "skipping essay");
        self.skipped += 1;
        self.failures.push(BatchFailure {
            essay: item.name.clone(),
            reason,
        });
    }
}

pub struct BatchRunner<S: EssayStore> {
    store: S,
    analyzer: Arc<dyn EssayAnalyzer>,
    strategy: ReportStrategy,
    builder: Arc<ReportBuilder>,
    preprocess: bool,
}

impl<S: EssayStore> BatchRunner<S> {
    pub fn new(store: S, analyzer: Arc<dyn EssayAnalyzer>, strategy: ReportStrategy) -> Self {
        let builder = Arc::new(ReportBuilder::new(strategy.clone()));
        Self {
            store,
            analyzer,
            strategy,
            builder,
            preprocess: false,
        }
    }

    /// Run the images through [`preprocess_image`] before the analysis.
    pub fn with_preprocessing(mut self, enabled: bool) -> Self {
        self.preprocess = enabled;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Correct every essay of the store.
    ///
    /// # Returns
    /// * `Ok(BatchSummary)` once every essay was attempted.
    /// * `Err(BatchError::TemplateNotFound)` before any essay is touched, when the template-fill
    ///   layout is configured and its template is missing.
    /// * `Err(BatchError::Io)` if the store cannot be listed.
    pub async fn run(&self) -> BatchResult<BatchSummary> {
        self.check_template()?;

        let items = self.store.list()?;
        let mut summary = BatchSummary::default();
        if items.is_empty() {
            tracing::info!("no essays found to correct");
            return Ok(summary);
        }
        tracing::info!(count = items.len(), analyzer = self.analyzer.name(), "starting batch");

        let total = items.len();
        for (index, item) in items.iter().enumerate() {
            tracing::info!(essay = %item.name, "[{}/{}] processing", index + 1, total);
            self.process(item, &mut summary).await;
        }

        tracing::info!(
            processed = summary.processed,
            skipped = summary.skipped,
            "batch finished"
        );
        Ok(summary)
    }

    fn check_template(&self) -> BatchResult<()> {
        if let ReportStrategy::TemplateFill { template_path } = &self.strategy {
            if !template_path.is_file() {
                return Err(BatchError::TemplateNotFound(template_path.clone()));
            }
        }
        Ok(())
    }

    async fn process(&self, item: &EssayItem, summary: &mut BatchSummary) {
        tracing::info!(essay = %item.name, "1/4 fetching image");
        let image = match self.store.fetch(item) {
            Ok(image) => image,
            Err(e) => return summary.skip(item, e.to_string()),
        };
        let Some(mime) = sniff_mime(&image).or_else(|| mime_for_path(&item.name)) else {
            return summary.skip(item, BatchError::UnsupportedFile(item.name.clone()).to_string());
        };
        let (image, mime) = if self.preprocess {
            match tokio::task::spawn_blocking(move || preprocess_image(&image)).await {
                Ok(processed) => {
                    let processed_mime = sniff_mime(&processed).unwrap_or(mime);
                    (processed, processed_mime)
                }
                Err(e) => return summary.skip(item, format!("image pre-processing failed: {e}")),
            }
        } else {
            (image, mime)
        };

        tracing::info!(essay = %item.name, "2/4 analysing with {}", self.analyzer.name());
        let raw = match self.analyzer.analyze(&image, mime).await {
            Ok(raw) => raw,
            Err(e) => return summary.skip(item, format!("AI analysis failed: {e}")),
        };

        tracing::info!(essay = %item.name, "3/4 building report");
        let builder = Arc::clone(&self.builder);
        let report = match tokio::task::spawn_blocking(move || builder.build_from_text(&raw)).await {
            Ok(Ok(report)) => report,
            Ok(Err(e)) => return summary.skip(item, e.to_string()),
            Err(e) => return summary.skip(item, format!("report task failed: {e}")),
        };
        if let ReportStatus::Fallback(error) = &report.status {
            if error.is_template_not_found() {
                return summary.skip(item, error.to_string());
            }
            tracing::warn!(essay = %item.name, error = %error, "storing fallback report");
        }

        tracing::info!(essay = %item.name, file = %report.file_name, "4/4 storing report");
        match self.store.store(&report.file_name, &report.bytes) {
            Ok(path) => {
                tracing::info!(essay = %item.name, path = %path.display(), "report saved");
                summary.processed += 1;
                summary.reports.push(path);
            }
            Err(e) => summary.skip(item, e.to_string()),
        }
    }
}
