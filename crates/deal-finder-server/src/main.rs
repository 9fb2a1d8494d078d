//! deal-finder HTTP Server
//!
//! Axum-based server exposing altcoin picks, keyword explore and token
//! search over the deal-finder library.

mod handlers;
mod state;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use deal_finder::{CoinGeckoClient, FinderConfig, MarketDataClient, MockMarketClient};
use llm_runtime::{ProviderConfig, build_provider};

use crate::handlers::{chain_picks, explore, health_check, list_chains, search_token};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let config = FinderConfig::from_env();
    tracing::info!(?config, "Loaded configuration");

    // Initialize text-generation provider
    let provider = build_provider(&ProviderConfig::from_env())?;
    match &provider {
        Some(p) => {
            let info = p.info();
            match p.health_check().await {
                Ok(true) => tracing::info!("✓ Connected to {} at {}", info.name, info.endpoint),
                Ok(false) | Err(_) => {
                    tracing::warn!("⚠ {} not reachable - picks will use the fallback", info.name);
                }
            }
        }
        None => {
            tracing::warn!("⚠ No text-generation provider configured - fallback picks only");
            tracing::warn!("  Set OPENAI_API_KEY or LLM_PROVIDER=ollama in .env");
        }
    }

    // Initialize market-data client
    let market: Arc<dyn MarketDataClient> = if std::env::var("MARKET_SOURCE")
        .is_ok_and(|s| s.eq_ignore_ascii_case("mock"))
    {
        tracing::warn!("⚠ Using mock market data");
        Arc::new(MockMarketClient::new())
    } else {
        Arc::new(CoinGeckoClient::new(config.market.clone())?)
    };

    if market.health_check().await {
        tracing::info!("✓ Connected to {}", market.name());
    } else {
        tracing::warn!("⚠ {} not reachable", market.name());
    }

    let state = AppState::new(&config, provider, market);
    let app = build_router(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 deal-finder server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health                          - Health check");
    tracing::info!("  GET  /api/chains                      - Supported chains");
    tracing::info!("  GET  /api/chains/{{chain}}/picks        - Top altcoin picks");
    tracing::info!("  GET  /api/chains/{{chain}}/explore      - Keyword explore");
    tracing::info!("  GET  /api/tokens/search?name=         - Token search");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health & info
        .route("/health", get(health_check))
        .route("/api/chains", get(list_chains))
        // Picks & explore
        .route("/api/chains/{chain}/picks", get(chain_picks))
        .route("/api/chains/{chain}/explore", get(explore))
        // Search
        .route("/api/tokens/search", get(search_token))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
