use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::main_lib::AppState;

const ENDPOINTS: &[(&str, &str)] = &[
    ("GET /api/info", "This listing"),
    ("GET /api/health", "Service and Teller API status"),
    ("POST /api/sync", "Sync all accounts now"),
    ("GET /api/accounts", "Accounts with their latest balance"),
    ("GET /api/accounts/{id}", "One account with its latest balance"),
    ("GET /api/accounts/{id}/balances", "Balance history for an account"),
    ("PUT /api/accounts/{id}/display-name", "Set or clear an account alias"),
    ("GET /api/accounts/{id}/transactions", "Recent transactions for an account"),
    ("GET /api/scheduled-payments", "Active scheduled payments"),
    ("POST /api/scheduled-payments", "Create a scheduled payment"),
    ("DELETE /api/scheduled-payments/{id}", "Deactivate a scheduled payment"),
    ("GET /api/weekly-forecast", "Seven-day cash flow projection"),
    ("POST /api/teller-connect/enroll", "Link a bank enrollment and sync it"),
    ("GET /api/teller-connect/status", "Active enrollments for a user"),
    ("POST /api/teller-connect/disconnect/{enrollment_id}", "Disconnect an enrollment"),
];

async fn get_info() -> Json<Value> {
    let endpoints: serde_json::Map<String, Value> = ENDPOINTS
        .iter()
        .map(|(route, description)| (route.to_string(), json!(description)))
        .collect();
    Json(json!({
        "name": "Teller Home",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": endpoints,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/info", get(get_info))
}
