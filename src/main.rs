//! Achieve CLI entry point.

use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use achieve::cli;
use achieve::llm::OpenAiCaller;
use achieve::search::TavilyClient;
use achieve::{FileRoadmapStore, ResourceSearchTool, RoadmapGenerator, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the real environment still applies.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "achieve=warn".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let settings = Settings::from_env()?;
    for key in settings.missing_secrets() {
        tracing::warn!(key, "secret not set; calls to its provider will fail");
    }

    let profile = {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut out = std::io::stdout();
        cli::read_profile(&mut input, &mut out)?
    };

    let search = ResourceSearchTool::new(Arc::new(TavilyClient::new(
        settings.tavily_api_key.clone().unwrap_or_default(),
    )))
    .with_max_results(settings.max_results);

    let generator = RoadmapGenerator::new(
        Arc::new(OpenAiCaller::from_settings(&settings)),
        Arc::new(search),
        settings.agent_config(),
    );

    let raw = generator.generate(&profile).await?;

    let store = FileRoadmapStore::new(&settings.data_dir);
    let mut out = std::io::stdout();
    cli::deliver(&raw, &store, &settings.roadmap_name, &mut out).await?;

    Ok(())
}
