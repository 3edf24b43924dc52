use log::debug;
use std::sync::Arc;

use super::accounts_model::{Account, AccountWithBalance};
use super::accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
use crate::balances::BalanceRepositoryTrait;
use crate::errors::Result;

/// Service for reading accounts and maintaining their local aliases
pub struct AccountService {
    repository: Arc<dyn AccountRepositoryTrait>,
    balance_repository: Arc<dyn BalanceRepositoryTrait>,
}

impl AccountService {
    pub fn new(
        repository: Arc<dyn AccountRepositoryTrait>,
        balance_repository: Arc<dyn BalanceRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            balance_repository,
        }
    }
}

#[async_trait::async_trait]
impl AccountServiceTrait for AccountService {
    fn list_accounts_with_balances(&self) -> Result<Vec<AccountWithBalance>> {
        let accounts = self.repository.list()?;
        let mut latest = self.balance_repository.list_latest()?;

        Ok(accounts
            .into_iter()
            .map(|account| {
                let balance = latest.remove(&account.id);
                AccountWithBalance::new(account, balance)
            })
            .collect())
    }

    fn get_account_with_balance(&self, account_id: &str) -> Result<AccountWithBalance> {
        let account = self.repository.get_by_id(account_id)?;
        let balance = self.balance_repository.latest_for_account(account_id)?;
        Ok(AccountWithBalance::new(account, balance))
    }

    async fn update_display_name(&self, account_id: &str, display_name: &str) -> Result<Account> {
        let trimmed = display_name.trim();
        let alias = (!trimmed.is_empty()).then(|| trimmed.to_string());
        debug!("Setting display name of account {} to {:?}", account_id, alias);
        self.repository.set_display_name(account_id, alias).await
    }
}
