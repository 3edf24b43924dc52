//! Account domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::balances::Balance;

/// Domain model representing a bank or credit account mirrored from the remote source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Remote account identifier
    pub id: String,
    pub name: String,
    /// User-assigned alias. Local only, never written by sync.
    pub display_name: Option<String>,
    #[serde(rename = "type")]
    pub account_type: String,
    pub subtype: Option<String>,
    pub institution_name: Option<String>,
    pub currency: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Account {
    /// Alias when set, otherwise the remote name.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

/// Remote-owned account fields written by a sync run.
///
/// `display_name` is deliberately absent: an upsert can create an account
/// or refresh its remote fields, but it can never touch the alias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountUpsert {
    pub id: String,
    pub name: String,
    pub account_type: String,
    pub subtype: Option<String>,
    pub institution_name: Option<String>,
    pub currency: String,
    pub status: String,
}

/// Outcome of a batch of account upserts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUpsertSummary {
    pub inserted: usize,
    pub updated: usize,
}

/// An account together with its most recent balance snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountWithBalance {
    #[serde(flatten)]
    pub account: Account,
    /// Ledger amount of the latest snapshot, zero when none was captured yet.
    pub current_balance: Decimal,
    pub balance: Option<Balance>,
}

impl AccountWithBalance {
    pub fn new(account: Account, balance: Option<Balance>) -> Self {
        let current_balance = balance.as_ref().map_or(Decimal::ZERO, |b| b.ledger);
        Self {
            account,
            current_balance,
            balance,
        }
    }
}
