mod logging;
mod routes;

use std::sync::Arc;
use std::time::Instant;

use clausewise_agent::summarizer_from_config;
use clausewise_core::{config::Config, pipeline::Pipeline};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::logging::BroadcastLayer;
use crate::routes::AppState;

// ── main ──────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let logs = BroadcastLayer::new();
    let log_tx = logs.tx.clone();
    let log_ring = Arc::clone(&logs.ring);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "clausewise_server=info,clausewise_core=info,clausewise_agent=info,tower_http=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(logs)
        .init();

    let config = Config::from_env();
    info!(?config, "configuration loaded");

    let pipeline = Pipeline::new(config.extractor(), summarizer_from_config(&config));
    info!(summarizer = pipeline.summarizer_mode(), "analysis pipeline ready");

    let state = Arc::new(AppState {
        pipeline,
        start_time: Instant::now(),
        log_tx,
        log_ring,
    });

    let app = routes::router(state, &config);

    let bind = config.web_bind.clone();
    let port = config.web_port;
    let addr = format!("{bind}:{port}");

    info!("Listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
