mod config;
mod errors;
mod extraction;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::{ResumeAnalyzer, Vocabulary};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Analyzer v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the extraction models once; shared read-only by all requests
    let analyzer = Arc::new(build_analyzer(&config)?);
    info!(
        "Resume analyzer initialized (recognizer: {}, skill terms: {}, max chars: {})",
        analyzer.recognizer_name(),
        analyzer.skill_term_count(),
        config.max_text_chars
    );

    let state = AppState {
        config: config.clone(),
        analyzer,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the analyzer from the configured vocabulary (built-in if unset).
fn build_analyzer(config: &Config) -> Result<ResumeAnalyzer> {
    let vocabulary = match &config.vocabulary_path {
        Some(path) => {
            info!("Loading vocabulary from {}", path.display());
            Vocabulary::from_file(path)
                .with_context(|| format!("Invalid vocabulary file '{}'", path.display()))?
        }
        None => Vocabulary::builtin(),
    };

    Ok(ResumeAnalyzer::rule_based(&vocabulary, config.max_text_chars))
}
