use ai::{GeminiAnalyzer, PromptTemplate};
use anyhow::Context;
use api::{app, state::AppState};
use reporter::ReportBuilder;
use std::{net::SocketAddr, sync::Arc};
use util::{config::AppConfig, logging::init_logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration and initialize logging
    let config = AppConfig::from_env().context("Invalid configuration")?;
    let _log_guard = init_logging(&config);

    // Set up dependencies
    let prompt = PromptTemplate::load(&config.prompt_path)
        .with_context(|| format!("Failed to load prompt {}", config.prompt_path.display()))?;
    let analyzer = GeminiAnalyzer::from_config(&config, prompt).context("Failed to set up AI client")?;
    let builder = ReportBuilder::from_config(&config);
    tracing::info!(
        model = analyzer.model(),
        strategy = builder.strategy_name(),
        "Report pipeline ready"
    );

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid address")?;
    let project_name = config.project_name.clone();

    let state = AppState::new(config, Arc::new(analyzer), builder);
    let app = app(state);

    // Start server
    println!("Starting {project_name} on http://{addr}");
    tracing::info!(%addr, "Starting {project_name}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind")?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server crashed")?;

    Ok(())
}
