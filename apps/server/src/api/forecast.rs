use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::Local;

use crate::{error::ApiResult, main_lib::AppState};
use tellerhome_core::forecast::WeeklyForecast;

async fn weekly_forecast(State(state): State<Arc<AppState>>) -> ApiResult<Json<WeeklyForecast>> {
    let today = Local::now().date_naive();
    let forecast = state.forecast_service.weekly_forecast(today)?;
    Ok(Json(forecast))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/weekly-forecast", get(weekly_forecast))
}
