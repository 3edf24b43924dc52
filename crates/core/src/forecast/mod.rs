//! Cash-flow forecast built from current balances and scheduled payments.

mod forecast_model;
mod forecast_service;

#[cfg(test)]
mod forecast_service_tests;

pub use forecast_model::{ForecastDay, ForecastPayment, WeeklyForecast};
pub use forecast_service::{project_days, ForecastService, ForecastServiceTrait};
