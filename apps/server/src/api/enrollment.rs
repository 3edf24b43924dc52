use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{error::ApiResult, main_lib::AppState};
use tellerhome_connect::EnrollOutcome;
use tellerhome_core::{
    constants::DEFAULT_USER_ID,
    enrollments::{EnrollmentRequest, UserEnrollment},
    errors::Error as CoreError,
};

/// 200 when the first sync succeeded, 207 when the enrollment was saved
/// but the sync failed.
async fn enroll(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let request: EnrollmentRequest = serde_json::from_value(body).map_err(CoreError::from)?;
    let outcome = state.enrollment_service.enroll(request).await?;

    let response = match outcome {
        EnrollOutcome::Synced { enrollment, result } => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "message": "Enrollment saved and synced",
                "enrollment": enrollment,
                "sync_result": result,
            })),
        ),
        EnrollOutcome::SyncFailed {
            enrollment,
            message,
        } => (
            StatusCode::MULTI_STATUS,
            Json(json!({
                "status": "partial",
                "message": "Enrollment saved but the initial sync failed",
                "enrollment": enrollment,
                "error": message,
            })),
        ),
    };
    Ok(response)
}

#[derive(Debug, Deserialize)]
struct StatusQuery {
    user_id: Option<String>,
}

async fn enrollment_status(
    Query(query): Query<StatusQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Value>> {
    let user_id = query.user_id.unwrap_or_else(|| DEFAULT_USER_ID.to_string());
    let enrollments: Vec<UserEnrollment> = state.enrollment_service.status(&user_id)?;
    Ok(Json(json!({
        "user_id": user_id,
        "connected": !enrollments.is_empty(),
        "enrollments": enrollments,
    })))
}

async fn disconnect(
    Path(enrollment_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Value>> {
    let enrollment = state.enrollment_service.disconnect(&enrollment_id).await?;
    Ok(Json(json!({
        "message": "Enrollment disconnected",
        "enrollment": enrollment,
    })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/teller-connect/enroll", post(enroll))
        .route("/teller-connect/status", get(enrollment_status))
        .route(
            "/teller-connect/disconnect/{enrollment_id}",
            post(disconnect),
        )
}
