//! Account repository and service traits.
//!
//! These traits define the contract for account operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::accounts_model::{Account, AccountUpsert, AccountUpsertSummary, AccountWithBalance};
use crate::errors::Result;

/// Trait defining the contract for Account repository operations.
#[async_trait]
pub trait AccountRepositoryTrait: Send + Sync {
    /// Inserts or refreshes every account in one write transaction.
    ///
    /// Either all rows commit or none do. Existing aliases are preserved.
    async fn upsert_synced(&self, accounts: Vec<AccountUpsert>) -> Result<AccountUpsertSummary>;

    /// Sets or clears the user alias. Fails with `NotFound` for unknown ids.
    async fn set_display_name(
        &self,
        account_id: &str,
        display_name: Option<String>,
    ) -> Result<Account>;

    /// Retrieves an account by its ID.
    fn get_by_id(&self, account_id: &str) -> Result<Account>;

    /// Lists all accounts ordered by id.
    fn list(&self) -> Result<Vec<Account>>;
}

/// Read/alias operations exposed to the HTTP layer.
#[async_trait]
pub trait AccountServiceTrait: Send + Sync {
    fn list_accounts_with_balances(&self) -> Result<Vec<AccountWithBalance>>;

    fn get_account_with_balance(&self, account_id: &str) -> Result<AccountWithBalance>;

    /// Trims the alias; an empty value clears it.
    async fn update_display_name(&self, account_id: &str, display_name: &str) -> Result<Account>;
}
