use std::sync::Arc;

use anyhow::Context;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use detailbook::config::AppConfig;
use detailbook::models::Catalog;
use detailbook::services::submission::log::LogSubmitter;
use detailbook::services::submission::webhook::WebhookSubmitter;
use detailbook::services::submission::Submitter;
use detailbook::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env()?;

    let catalog = match &config.catalog_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read catalog file: {path}"))?;
            Catalog::from_json(&raw).with_context(|| format!("invalid catalog file: {path}"))?
        }
        None => Catalog::builtin().context("built-in catalog is invalid")?,
    };
    tracing::info!(
        services = catalog.services().len(),
        add_ons = catalog.add_ons().len(),
        "catalog loaded"
    );

    let submitter: Box<dyn Submitter> = match &config.submission_webhook_url {
        Some(url) => {
            tracing::info!("forwarding submissions to {url}");
            Box::new(WebhookSubmitter::new(url.clone()))
        }
        None => {
            tracing::info!(
                latency_ms = config.simulated_latency.as_millis() as u64,
                "no submission backend configured, logging submissions only"
            );
            Box::new(LogSubmitter::new(config.simulated_latency))
        }
    };

    let seed = config.availability_seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "availability calendar seeded");

    let addr = format!("0.0.0.0:{}", config.port);
    let state = Arc::new(AppState::new(config, catalog, submitter, seed));

    let app = detailbook::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
