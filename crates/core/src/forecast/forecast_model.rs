use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPayment {
    pub name: String,
    pub amount: Decimal,
    pub category: Option<String>,
}

/// One projected day. `ending_balance` carries into the next day's start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub day_name: String,
    pub starting_balance: Decimal,
    pub payments: Vec<ForecastPayment>,
    pub total_payments: Decimal,
    pub ending_balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyForecast {
    pub forecast: Vec<ForecastDay>,
    pub generated_at: NaiveDateTime,
}
