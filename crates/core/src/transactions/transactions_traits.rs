use std::collections::HashSet;

use async_trait::async_trait;

use super::transactions_model::{NewTransaction, Transaction};
use crate::errors::Result;

#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Returns the subset of `ids` already stored.
    fn existing_ids(&self, ids: &[String]) -> Result<HashSet<String>>;

    /// Inserts the batch in one write transaction, ignoring ids that already
    /// exist. Returns the number of rows actually inserted.
    async fn insert_new(&self, transactions: Vec<NewTransaction>) -> Result<usize>;

    /// Newest first, at most `limit` rows.
    fn list_for_account(&self, account_id: &str, limit: i64) -> Result<Vec<Transaction>>;
}

pub trait TransactionServiceTrait: Send + Sync {
    fn list_for_account(&self, account_id: &str, limit: Option<i64>) -> Result<Vec<Transaction>>;
}
