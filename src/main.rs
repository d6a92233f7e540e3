mod aggregator;
mod config;
mod dedupe;
mod error;
mod fetchers;
mod generation;
mod models;
mod routes;
mod state;
#[cfg(test)]
mod testing;

use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use clap::Parser;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::aggregator::Aggregator;
use crate::config::{Config, LogFormat};
use crate::generation::{GeminiClient, TextGenerator};
use crate::state::AppState;

async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("jobscout=info,tower_http=info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_tracing(config.log_format);

    let http = reqwest::Client::builder()
        .timeout(config.http_timeout())
        .build()?;

    let fetchers = fetchers::configured_fetchers(&config, &http);
    tracing::info!("{} job provider(s) configured", fetchers.len());

    let generator: Option<Arc<dyn TextGenerator>> = match config.gemini() {
        Some(settings) => {
            tracing::info!(model = %settings.model, "Gemini generation enabled");
            let client: Arc<dyn TextGenerator> =
                Arc::new(GeminiClient::new(http.clone(), settings));
            Some(client)
        }
        None => {
            tracing::warn!("GEMINI_API_KEY not set; generation endpoints will return errors");
            None
        }
    };

    let state = AppState::new(Aggregator::new(fetchers), generator);

    let app = Router::new()
        .route("/healthz", get(healthz))
        .merge(routes::api::router(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("Listening on {}", config.listen_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
