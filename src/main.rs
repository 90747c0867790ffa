use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use pfms_core::{scoring_config_from_env_values, CoreConfig, FeedbackService, ScoringOverrides};

/// Main entry point for the PFMS feedback insights service
///
/// Resolves configuration once from the environment (and an optional `.env` file), then
/// serves the REST API until the process is stopped.
///
/// # Environment Variables
/// - `PFMS_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `PFMS_CATEGORY_WEIGHT`, `PFMS_ANSWER_WEIGHT`: blend weights (default: 0.4 / 0.6)
/// - `PFMS_CONFIDENCE_BOOST`: added to answer confidence (default: 0.2)
/// - `PFMS_POSITIVE_THRESHOLD`, `PFMS_NEGATIVE_THRESHOLD`: verdict cut-offs (default: 0.6 / 0.4)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the scoring overrides are invalid,
/// - the server address cannot be parsed or bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("pfms=info".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr: SocketAddr = std::env::var("PFMS_REST_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".into())
        .parse()?;

    let scoring = scoring_config_from_env_values(ScoringOverrides {
        category_weight: std::env::var("PFMS_CATEGORY_WEIGHT").ok(),
        answer_weight: std::env::var("PFMS_ANSWER_WEIGHT").ok(),
        confidence_boost: std::env::var("PFMS_CONFIDENCE_BOOST").ok(),
        positive_threshold: std::env::var("PFMS_POSITIVE_THRESHOLD").ok(),
        negative_threshold: std::env::var("PFMS_NEGATIVE_THRESHOLD").ok(),
    })?;
    tracing::info!("++ Scoring configuration: {:?}", scoring);

    let cfg = Arc::new(CoreConfig::new(scoring));
    let app = api_rest::router(AppState::new(FeedbackService::new(cfg)));

    tracing::info!("++ Starting PFMS REST on {}", rest_addr);

    let listener = tokio::net::TcpListener::bind(rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
