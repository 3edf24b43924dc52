use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde_json::{json, Value};

use crate::{error::ApiResult, main_lib::AppState};

/// Syncs with the application token when configured, otherwise runs every
/// active enrollment.
pub async fn perform_sync(state: &AppState) -> ApiResult<Value> {
    if let Some(client) = state.app_client() {
        let result = state.sync_service.sync_all(client.as_ref()).await?;
        return Ok(json!({
            "message": "Sync completed",
            "mode": "app_token",
            "result": result,
        }));
    }

    let summary = state.enrollment_service.sync_all_active().await?;
    let message = if summary.enrollments == 0 {
        "No active enrollments to sync"
    } else if summary.failed == 0 {
        "Sync completed"
    } else {
        "Sync completed with failures"
    };
    Ok(json!({
        "message": message,
        "mode": "enrollments",
        "result": summary,
    }))
}

async fn trigger_sync(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let body = perform_sync(&state).await?;
    Ok(Json(body))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/sync", post(trigger_sync))
}
