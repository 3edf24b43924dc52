use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A point-in-time balance snapshot. Rows are never mutated once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub id: i32,
    pub account_id: String,
    pub available: Decimal,
    pub ledger: Decimal,
    #[serde(rename = "timestamp")]
    pub captured_at: NaiveDateTime,
}

/// Snapshot captured during a sync run, before it receives a row id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBalance {
    pub account_id: String,
    pub available: Decimal,
    pub ledger: Decimal,
    pub captured_at: NaiveDateTime,
}
