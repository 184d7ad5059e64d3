//! Health check route

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::Extension, Json};

use crate::db::Database;
use crate::error::ServerResult;
use crate::models::{DatabaseHealth, HealthResponse};

/// Server start time for uptime calculation
pub struct ServerState {
    pub db: Database,
    pub start_time: Instant,
}

impl ServerState {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            start_time: Instant::now(),
        }
    }
}

/// Shared state wrapper
pub type SharedState = Arc<ServerState>;

/// GET /health - Health check endpoint
pub async fn health_check(
    Extension(state): Extension<SharedState>,
) -> ServerResult<Json<HealthResponse>> {
    let uptime = state.start_time.elapsed();
    let entries = state.db.count_entries()?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime.as_secs(),
        database: DatabaseHealth {
            path: state.db.path().display().to_string(),
            entries,
            size_bytes: state.db.size_bytes(),
        },
    }))
}
