use std::sync::Arc;

use super::transactions_model::Transaction;
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::errors::{Result, ValidationError};
use crate::Error;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_LIST_LIMIT: i64 = 100;

pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
}

impl TransactionService {
    pub fn new(repository: Arc<dyn TransactionRepositoryTrait>) -> Self {
        Self { repository }
    }
}

impl TransactionServiceTrait for TransactionService {
    fn list_for_account(&self, account_id: &str, limit: Option<i64>) -> Result<Vec<Transaction>> {
        let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT);
        if limit < 0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "limit must not be negative".to_string(),
            )));
        }
        self.repository.list_for_account(account_id, limit)
    }
}
