//! Transactions module - immutable ledger entries mirrored from the remote source.

mod transactions_model;
mod transactions_service;
mod transactions_traits;

pub use transactions_model::{NewTransaction, Transaction, DEFAULT_TRANSACTION_STATUS};
pub use transactions_service::{TransactionService, DEFAULT_LIST_LIMIT};
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
