use ai::EssayAnalyzer;
use reporter::ReportBuilder;
use std::sync::Arc;
use util::config::AppConfig;

/// Shared, immutable state handed to every handler.
///
/// Everything is behind an `Arc`, so cloning per request is cheap. The report builder reads its
/// template fresh on each build, which keeps the state free of interior mutability.
#[derive(Clone)]
pub struct AppState {
    config: Arc<AppConfig>,
    analyzer: Arc<dyn EssayAnalyzer>,
    builder: Arc<ReportBuilder>,
}

impl AppState {
    pub fn new(config: AppConfig, analyzer: Arc<dyn EssayAnalyzer>, builder: ReportBuilder) -> Self {
        Self {
            config: Arc::new(config),
            analyzer,
            builder: Arc::new(builder),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn analyzer(&self) -> &dyn EssayAnalyzer {
        self.analyzer.as_ref()
    }

    pub fn builder_clone(&self) -> Arc<ReportBuilder> {
        Arc::clone(&self.builder)
    }
}
