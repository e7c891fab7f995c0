//! REST API server for the maritime agent orchestrator
//!
//! Exposes the captain and specialist agents via HTTP endpoints.
//! Transport failures never alter computed facts: generation errors
//! degrade to fallback text inside the agents, and residual handler
//! errors map to a generic service error envelope.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::captain::CaptainAgent;
use crate::specialist::{CargoMatcher, MarketAnalyst, VoyagePlanner};

/// =============================
/// Request Models
/// =============================

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SpecialistRequest {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct ClearContextRequest {
    pub user_id: Option<String>,
}

/// =============================
/// Response Wrapper
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        Self {
            success: true,
            data: serde_json::to_value(data).ok(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub captain: Arc<CaptainAgent>,
    pub voyage_planner: Arc<VoyagePlanner>,
    pub cargo_matcher: Arc<CargoMatcher>,
    pub market_analyst: Arc<MarketAnalyst>,
}

/// =============================
/// Helpers — Stable Session Ids
/// =============================

fn stable_uuid_from_string(input: &str) -> uuid::Uuid {
    use sha2::{Digest, Sha256};

    let hash = Sha256::digest(input.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&hash[..16]);

    // Set UUID version (4) and variant (RFC4122) bits.
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    uuid::Uuid::from_bytes(bytes)
}

fn session_id(user_id: Option<&str>) -> uuid::Uuid {
    stable_uuid_from_string(user_id.filter(|id| !id.trim().is_empty()).unwrap_or("anonymous"))
}

/// =============================
/// Health Endpoint
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// =============================
/// Captain Endpoint
/// =============================

async fn run_query(
    State(state): State<ApiState>,
    Json(req): Json<QueryRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    info!("Received captain query: {}", req.query);

    match state
        .captain
        .process_query(&req.query, req.user_id.as_deref())
        .await
    {
        Ok(response) => {
            let session = session_id(req.user_id.as_deref());
            let mut data = match serde_json::to_value(&response) {
                Ok(value) => value,
                Err(e) => {
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(ApiResponse::error(format!("Serialization failed: {}", e))),
                    )
                }
            };
            data["session_id"] = serde_json::json!(session.to_string());

            (StatusCode::OK, Json(ApiResponse::success(data)))
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Query handling failed: {}", e))),
        ),
    }
}

/// =============================
/// Specialist Endpoints
/// =============================

async fn run_specialist(
    State(state): State<ApiState>,
    Path(agent): Path<String>,
    Json(req): Json<SpecialistRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    info!("Received specialist query for {}: {}", agent, req.query);

    let result = match agent.as_str() {
        "voyage-planning" => state.voyage_planner.process_query(&req.query).await,
        "cargo-matching" => state.cargo_matcher.process_query(&req.query).await,
        "market-insights" => state.market_analyst.process_query(&req.query).await,
        _ => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(format!("Unknown specialist: {}", agent))),
            )
        }
    };

    match result {
        Ok(response) => (StatusCode::OK, Json(ApiResponse::success(response))),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Specialist failed: {}", e))),
        ),
    }
}

/// =============================
/// Session Endpoints
/// =============================

async fn get_history(
    State(state): State<ApiState>,
    Path(user_id): Path<String>,
) -> (StatusCode, Json<ApiResponse>) {
    match state.captain.sessions().history(Some(&user_id)).await {
        Ok(history) => (StatusCode::OK, Json(ApiResponse::success(history))),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("History load failed: {}", e))),
        ),
    }
}

async fn clear_context(
    State(state): State<ApiState>,
    Json(req): Json<ClearContextRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    match state
        .captain
        .sessions()
        .clear(req.user_id.as_deref())
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(serde_json::json!({"cleared": true}))),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Context clear failed: {}", e))),
        ),
    }
}

/// =============================
/// Router
/// =============================

pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/query", post(run_query))
        .route("/api/specialist/:agent", post(run_specialist))
        .route("/api/history/:user_id", get(get_history))
        .route("/api/context/clear", post(clear_context))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(
    state: ApiState,
    port: u16,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}
