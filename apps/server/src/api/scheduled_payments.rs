use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde_json::Value;

use crate::{error::ApiResult, main_lib::AppState};
use tellerhome_core::{
    errors::Error as CoreError,
    scheduled_payments::{NewScheduledPayment, ScheduledPayment},
};

async fn list_payments(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ScheduledPayment>>> {
    let payments = state.scheduled_payment_service.list_active_payments()?;
    Ok(Json(payments))
}

async fn create_payment(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<ScheduledPayment>)> {
    // decoded here so missing or malformed fields are a 400, not axum's 422
    let payment: NewScheduledPayment = serde_json::from_value(body).map_err(CoreError::from)?;
    let created = state.scheduled_payment_service.create_payment(payment).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn delete_payment(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.scheduled_payment_service.delete_payment(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/scheduled-payments",
            get(list_payments).post(create_payment),
        )
        .route("/scheduled-payments/{id}", delete(delete_payment))
}
