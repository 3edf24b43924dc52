use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};
use tellerhome_core::transactions::Transaction;

#[derive(Debug, Deserialize)]
struct ListQuery {
    limit: Option<i64>,
}

async fn list_transactions(
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let transactions = state
        .transaction_service
        .list_for_account(&id, query.limit)?;
    Ok(Json(transactions))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/accounts/{id}/transactions", get(list_transactions))
}
