use std::sync::Arc;

use axum::{http::HeaderValue, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::Config, main_lib::AppState};

pub mod accounts;
pub mod enrollment;
pub mod forecast;
pub mod health;
pub mod info;
pub mod scheduled_payments;
pub mod sync;
pub mod transactions;

fn cors_layer(config: &Config) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if config.cors_allow_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = config
        .cors_allow_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", o);
                None
            }
        })
        .collect();
    layer.allow_origin(origins)
}

/// All `/api` routes. Static files are attached by the caller as a fallback.
pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let api = Router::new()
        .merge(info::router())
        .merge(health::router())
        .merge(sync::router())
        .merge(accounts::router())
        .merge(transactions::router())
        .merge(scheduled_payments::router())
        .merge(forecast::router())
        .merge(enrollment::router());

    Router::new()
        .nest("/api", api)
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
