//! HTTP Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use deal_finder::{
    AiPickBlock, CHAINS, Chain, CoinSummary, PickCard, Recommendation, Snapshot,
    keyword_search, search::EXPLORE_LIMIT,
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub provider: Option<String>,
    pub provider_connected: bool,
    pub market: String,
    pub market_connected: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, code: &str, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.into(),
        }),
    )
}

#[derive(Debug, Serialize)]
pub struct PicksResponse {
    pub chain: &'static str,
    /// "ai" or "fallback"
    pub source: &'static str,
    pub fetched_at: DateTime<Utc>,
    pub coins_considered: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<AiPickBlock>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picks: Option<Vec<PickEntry>>,
}

/// A fallback pick with its summary
#[derive(Debug, Serialize)]
pub struct PickEntry {
    #[serde(flatten)]
    pub card: PickCard,
    pub summary: CoinSummary,
}

#[derive(Debug, Deserialize)]
pub struct ExploreQuery {
    #[serde(default)]
    pub keyword: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExploreResponse {
    pub chain: &'static str,
    pub keyword: String,
    pub matches: Vec<PickCard>,
}

#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub coin: PickCard,
    pub summary: CoinSummary,
}

// ============================================================================
// Helpers
// ============================================================================

fn resolve_chain(name: &str) -> Result<Chain, ApiError> {
    Chain::find(name).ok_or_else(|| {
        api_error(
            StatusCode::NOT_FOUND,
            "UNKNOWN_CHAIN",
            format!("Unknown chain '{name}'"),
        )
    })
}

async fn fetch_snapshot(state: &AppState, chain: &Chain) -> Result<Snapshot, ApiError> {
    let snapshot = state.market.fetch_snapshot(chain).await;
    if snapshot.is_empty() {
        return Err(api_error(
            StatusCode::BAD_GATEWAY,
            "UPSTREAM_UNAVAILABLE",
            format!("Could not fetch coins for {}.", chain.name),
        ));
    }
    Ok(snapshot)
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (provider, provider_connected) = match &state.provider {
        Some(p) => (Some(p.info().name), p.health_check().await.unwrap_or(false)),
        None => (None, false),
    };

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        provider,
        provider_connected,
        market: state.market.name().to_string(),
        market_connected: state.market.health_check().await,
    })
}

/// Supported chains and their explore keywords
pub async fn list_chains() -> Json<Vec<Chain>> {
    Json(CHAINS.to_vec())
}

/// Top picks for a chain
pub async fn chain_picks(
    State(state): State<AppState>,
    Path(chain): Path<String>,
) -> Result<Json<PicksResponse>, ApiError> {
    let chain = resolve_chain(&chain)?;
    let snapshot = fetch_snapshot(&state, &chain).await?;

    let recommendation = state.engine.select_picks(&chain, &snapshot.coins).await;
    let source = recommendation.source();

    let (blocks, picks) = match recommendation {
        Recommendation::Ai { blocks, .. } => (Some(blocks), None),
        Recommendation::Fallback { picks } => {
            let mut entries = Vec::with_capacity(picks.len());
            // One summary call per pick, in order
            for coin in picks.records() {
                let summary = state.summarizer.summarize(&coin.name, &coin.description).await;
                entries.push(PickEntry {
                    card: PickCard::from(coin),
                    summary,
                });
            }
            (None, Some(entries))
        }
    };

    Ok(Json(PicksResponse {
        chain: chain.name,
        source,
        fetched_at: snapshot.fetched_at,
        coins_considered: snapshot.len(),
        blocks,
        picks,
    }))
}

/// Keyword explore within a chain
pub async fn explore(
    State(state): State<AppState>,
    Path(chain): Path<String>,
    Query(query): Query<ExploreQuery>,
) -> Result<Json<ExploreResponse>, ApiError> {
    let chain = resolve_chain(&chain)?;
    let keyword = query
        .keyword
        .filter(|k| !k.trim().is_empty())
        .or_else(|| chain.keywords.first().map(|k| (*k).to_string()))
        .unwrap_or_default();

    let snapshot = fetch_snapshot(&state, &chain).await?;
    let matches = keyword_search(&keyword, &snapshot.coins)
        .into_iter()
        .take(EXPLORE_LIMIT)
        .map(PickCard::from)
        .collect();

    Ok(Json(ExploreResponse {
        chain: chain.name,
        keyword,
        matches,
    }))
}

/// Token search by name, across chains
pub async fn search_token(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<TokenResponse>, ApiError> {
    let name = query.name.trim();
    if name.is_empty() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "MISSING_NAME",
            "Query parameter 'name' is required",
        ));
    }

    let profile = state.lookup.lookup(name).await.map_err(|e| {
        tracing::warn!("Token search error: {}", e);
        api_error(StatusCode::BAD_GATEWAY, "MARKET_ERROR", "Token search failed.")
    })?;

    let profile = profile.ok_or_else(|| {
        api_error(StatusCode::NOT_FOUND, "TOKEN_NOT_FOUND", "Token not found.")
    })?;

    Ok(Json(TokenResponse {
        coin: PickCard::from(&profile.coin),
        summary: profile.summary,
    }))
}
