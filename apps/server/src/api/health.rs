use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::main_lib::AppState;

#[derive(Debug, Serialize)]
struct HealthStatus {
    status: &'static str,
    timestamp: String,
    teller_api: &'static str,
}

/// Liveness plus a check of the Teller API using the application token.
async fn get_health(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    let teller_api = match state.app_client() {
        Some(client) => {
            if client.test_connection().await {
                "connected"
            } else {
                "disconnected"
            }
        }
        None => "not_configured",
    };
    Json(HealthStatus {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339(),
        teller_api,
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}
