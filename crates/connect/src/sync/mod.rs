//! Account, balance and transaction synchronization.

mod mapping;
mod models;
mod service;


pub use mapping::{
    account_upsert_from_remote, balance_from_remote, remote_id, transaction_from_remote,
};
pub use models::{SkippedAccount, SyncConfig, SyncResult, SyncStage};
pub use service::SyncService;
