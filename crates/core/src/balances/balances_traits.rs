use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::balances_model::{Balance, NewBalance};
use crate::errors::Result;

#[async_trait]
pub trait BalanceRepositoryTrait: Send + Sync {
    /// Appends every snapshot in a single write transaction.
    /// Returns the number of rows inserted.
    async fn insert_many(&self, balances: Vec<NewBalance>) -> Result<usize>;

    /// Deletes snapshots captured before `cutoff`, always keeping the newest
    /// row of each account. Returns the number of rows removed.
    async fn prune_before(&self, cutoff: NaiveDateTime) -> Result<usize>;

    fn latest_for_account(&self, account_id: &str) -> Result<Option<Balance>>;

    /// Newest snapshot of every account that has one, keyed by account id.
    fn list_latest(&self) -> Result<HashMap<String, Balance>>;

    /// Full history for one account, newest first.
    fn list_for_account(&self, account_id: &str) -> Result<Vec<Balance>>;
}
