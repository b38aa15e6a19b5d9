//! fylr API Server
//!
//! Main entry point for the fylr backend service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fylr_api::{AppState, create_router};
use fylr_db::connect_with_pool;
use fylr_integrations::{LlmExpenseCategorizer, LlmGuidanceAdvisor, OpenAiClient, StripeBilling};
use fylr_shared::{AppConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fylr=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = connect_with_pool(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await?;
    info!("Connected to database");

    let jwt_service = JwtService::new(&config.jwt);

    let openai = OpenAiClient::from_config(&config.openai)?;
    match &openai {
        Some(client) => info!(model = client.model(), "Text generation configured"),
        None => warn!("No text generation key configured, AI features use fallbacks"),
    }

    let billing = StripeBilling::new(&config.stripe)?;
    if !billing.is_configured() {
        warn!("No payment provider key configured, subscriptions are mocked");
    }

    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
        categorizer: Arc::new(LlmExpenseCategorizer::new(openai.clone())),
        advisor: Arc::new(LlmGuidanceAdvisor::new(openai)),
        billing: Arc::new(billing),
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
