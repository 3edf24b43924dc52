//! Wire shapes returned by the Teller API.
//!
//! Only the fields the sync engine reads are modelled; everything else in
//! the payload is ignored. Every field is optional because the API omits
//! or nulls fields depending on institution and account type.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TellerInstitution {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TellerAccount {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub account_type: Option<String>,
    pub subtype: Option<String>,
    pub institution: Option<TellerInstitution>,
    pub currency: Option<String>,
    pub status: Option<String>,
    pub enrollment_id: Option<String>,
}

/// Amounts arrive as strings or numbers, and may be null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TellerBalance {
    pub account_id: Option<String>,
    pub available: Option<Value>,
    pub ledger: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TellerTransactionDetails {
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TellerTransaction {
    pub id: Option<String>,
    pub account_id: Option<String>,
    pub amount: Option<Value>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub status: Option<String>,
    pub details: Option<TellerTransactionDetails>,
}

impl TellerTransaction {
    /// Top-level category, falling back to `details.category`.
    pub fn resolved_category(&self) -> Option<String> {
        self.category
            .clone()
            .or_else(|| self.details.as_ref().and_then(|d| d.category.clone()))
    }
}
