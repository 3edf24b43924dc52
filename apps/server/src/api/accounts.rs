use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};
use tellerhome_core::{
    accounts::{Account, AccountWithBalance},
    balances::Balance,
};

async fn list_accounts(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<AccountWithBalance>>> {
    let accounts = state.account_service.list_accounts_with_balances()?;
    Ok(Json(accounts))
}

async fn get_account(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<AccountWithBalance>> {
    let account = state.account_service.get_account_with_balance(&id)?;
    Ok(Json(account))
}

async fn get_balance_history(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Balance>>> {
    // 404 for unknown accounts rather than an empty history
    state.account_service.get_account_with_balance(&id)?;
    let history = state.balance_repository.list_for_account(&id)?;
    Ok(Json(history))
}

#[derive(Debug, Deserialize)]
struct DisplayNameRequest {
    #[serde(default)]
    display_name: Option<String>,
}

async fn update_display_name(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<DisplayNameRequest>,
) -> ApiResult<Json<Account>> {
    let display_name = body.display_name.unwrap_or_default();
    let account = state
        .account_service
        .update_display_name(&id, &display_name)
        .await?;
    Ok(Json(account))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/accounts", get(list_accounts))
        .route("/accounts/{id}", get(get_account))
        .route("/accounts/{id}/balances", get(get_balance_history))
        .route("/accounts/{id}/display-name", put(update_display_name))
}
