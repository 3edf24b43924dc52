use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Settlement status used when the remote omits one.
pub const DEFAULT_TRANSACTION_STATUS: &str = "posted";

/// A stored transaction. Negative amounts are debits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    pub amount: Decimal,
    /// Occurrence instant in UTC
    pub date: NaiveDateTime,
    pub description: String,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
}

/// A transaction observed remotely and not yet stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub id: String,
    pub account_id: String,
    pub amount: Decimal,
    pub date: NaiveDateTime,
    pub description: String,
    pub category: Option<String>,
    pub transaction_type: Option<String>,
    pub status: String,
}
