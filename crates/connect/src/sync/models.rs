use serde::{Deserialize, Serialize};

/// Default number of transactions requested per account.
pub const DEFAULT_TRANSACTION_PAGE_SIZE: u32 = 500;

#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Upper bound on transactions fetched per account per run.
    pub transaction_page_size: u32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            transaction_page_size: DEFAULT_TRANSACTION_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStage {
    Accounts,
    Balances,
    Transactions,
}

/// Something a run had to leave out, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedAccount {
    /// `None` when the remote record carried no id at all.
    pub account_id: Option<String>,
    pub stage: SyncStage,
    pub reason: String,
}

/// Counts produced by one `sync_all` run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResult {
    pub run_id: String,
    /// Accounts observed and upserted
    pub accounts: usize,
    /// Balance snapshots appended
    pub balances: usize,
    /// Transactions newly inserted
    pub transactions: usize,
    #[serde(default)]
    pub skipped: Vec<SkippedAccount>,
}

impl SyncResult {
    pub fn is_degraded(&self) -> bool {
        !self.skipped.is_empty()
    }
}
