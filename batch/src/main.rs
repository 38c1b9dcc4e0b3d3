use ai::{GeminiAnalyzer, PromptTemplate};
use anyhow::{Context, Result};
use batch::{BatchRunner, LocalDirStore};
use clap::{Parser, ValueEnum};
use reporter::ReportStrategy;
use std::path::PathBuf;
use std::sync::Arc;
use util::config::{AppConfig, StrategyKind};
use util::logging::init_logging;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StrategyArg {
    Generative,
    Template,
}

impl From<StrategyArg> for StrategyKind {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Generative => StrategyKind::Generative,
            StrategyArg::Template => StrategyKind::Template,
        }
    }
}

/// Correct every essay photo in a folder and write one .docx report per essay.
///
/// Options left out fall back to the environment (BATCH_INPUT_DIR, BATCH_OUTPUT_DIR,
/// REPORT_STRATEGY, REPORT_TEMPLATE_PATH, PREPROCESS_IMAGES).
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Folder with the essay images (.jpg, .jpeg, .png)
    #[arg(long)]
    input: Option<PathBuf>,
    /// Folder the reports are written to, created if missing
    #[arg(long)]
    output: Option<PathBuf>,
    /// Report layout
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,
    /// .docx template used by the template layout
    #[arg(long)]
    template: Option<PathBuf>,
    /// Enhance the images (grayscale, contrast, sharpen) before the analysis
    #[arg(long)]
    preprocess: bool,
}

impl Args {
    fn apply(self, config: &mut AppConfig) {
        if let Some(input) = self.input {
            config.input_dir = input;
        }
        if let Some(output) = self.output {
            config.output_dir = output;
        }
        if let Some(strategy) = self.strategy {
            config.report_strategy = strategy.into();
        }
        if let Some(template) = self.template {
            config.template_path = template;
        }
        config.preprocess_images |= self.preprocess;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = AppConfig::from_env().context("Invalid configuration")?;
    args.apply(&mut config);
    let _log_guard = init_logging(&config);

    println!("Starting batch correction...");

    let prompt = PromptTemplate::load(&config.prompt_path)
        .with_context(|| format!("Failed to load prompt {}", config.prompt_path.display()))?;
    let analyzer = GeminiAnalyzer::from_config(&config, prompt).context("Failed to set up AI client")?;
    let store = LocalDirStore::new(&config.input_dir, &config.output_dir)?;

    let runner = BatchRunner::new(store, Arc::new(analyzer), ReportStrategy::from_config(&config))
        .with_preprocessing(config.preprocess_images);
    let summary = runner.run().await?;

    if summary.processed == 0 && summary.skipped == 0 {
        println!("No essays found in {}", config.input_dir.display());
        return Ok(());
    }
    println!(
        "{} report(s) saved to {}, {} essay(s) skipped",
        summary.processed,
        config.output_dir.display(),
        summary.skipped
    );
    for failure in &summary.failures {
        println!("  - {}: {}", failure.essay, failure.reason);
    }
    Ok(())
}
