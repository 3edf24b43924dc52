//! The three-stage sync engine.
//!
//! A run reconciles one credential: accounts first (their ids become the
//! scope), then one balance snapshot per scoped account, then any
//! transactions not stored yet. Every stage commits as a single writer job.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use log::{debug, error, info, warn};
use uuid::Uuid;

use tellerhome_core::accounts::AccountRepositoryTrait;
use tellerhome_core::balances::BalanceRepositoryTrait;
use tellerhome_core::errors::Result;
use tellerhome_core::transactions::TransactionRepositoryTrait;

use super::mapping::{
    account_upsert_from_remote, balance_from_remote, remote_id, transaction_from_remote,
};
use super::models::{SkippedAccount, SyncConfig, SyncResult, SyncStage};
use crate::traits::BankApiClient;

pub struct SyncService {
    account_repository: Arc<dyn AccountRepositoryTrait>,
    balance_repository: Arc<dyn BalanceRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    config: SyncConfig,
}

impl SyncService {
    pub fn new(
        account_repository: Arc<dyn AccountRepositoryTrait>,
        balance_repository: Arc<dyn BalanceRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    ) -> Self {
        Self {
            account_repository,
            balance_repository,
            transaction_repository,
            config: SyncConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SyncConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs accounts, balances and transactions in order for the credential
    /// bound to `client`.
    ///
    /// Fails only when the account stage fails or the store rejects a write.
    /// Per-account fetch problems in later stages lower the counts and are
    /// listed in [`SyncResult::skipped`].
    pub async fn sync_all(&self, client: &dyn BankApiClient) -> Result<SyncResult> {
        let run_id = Uuid::now_v7().to_string();
        info!("[Sync {}] Starting sync", run_id);

        let mut skipped = Vec::new();

        let scope = self.sync_accounts(client, &mut skipped).await.map_err(|e| {
            error!("[Sync {}] Account stage failed: {}", run_id, e);
            e
        })?;
        let balances = self.sync_balances(client, &scope, &mut skipped).await?;
        let transactions = self
            .sync_transactions(client, &scope, &mut skipped)
            .await?;

        let result = SyncResult {
            run_id,
            accounts: scope.len(),
            balances,
            transactions,
            skipped,
        };
        info!(
            "[Sync {}] Done: {} accounts, {} balances, {} new transactions, {} skipped",
            result.run_id,
            result.accounts,
            result.balances,
            result.transactions,
            result.skipped.len()
        );
        Ok(result)
    }

    /// Upserts every remote account in one write job and returns the
    /// observed ids in listing order. This list scopes the later stages.
    pub async fn sync_accounts(
        &self,
        client: &dyn BankApiClient,
        skipped: &mut Vec<SkippedAccount>,
    ) -> Result<Vec<String>> {
        let remote_accounts = client.list_accounts().await?;

        let mut seen = HashSet::new();
        let mut scope = Vec::with_capacity(remote_accounts.len());
        let mut upserts = Vec::with_capacity(remote_accounts.len());

        for remote in &remote_accounts {
            let Some(upsert) = account_upsert_from_remote(remote) else {
                warn!(
                    "Skipping remote account without id (name: {:?})",
                    remote.name
                );
                skipped.push(SkippedAccount {
                    account_id: None,
                    stage: SyncStage::Accounts,
                    reason: "account record has no id".to_string(),
                });
                continue;
            };
            if !seen.insert(upsert.id.clone()) {
                debug!("Account {} listed twice; keeping first", upsert.id);
                continue;
            }
            debug!("Observed account {} ({})", upsert.id, upsert.name);
            scope.push(upsert.id.clone());
            upserts.push(upsert);
        }

        let summary = self.account_repository.upsert_synced(upserts).await?;
        info!(
            "Accounts synced: {} new, {} updated",
            summary.inserted, summary.updated
        );
        Ok(scope)
    }

    /// Captures one balance snapshot per scoped account. Fetch failures are
    /// recorded and skipped; the snapshots are appended in one write job.
    pub async fn sync_balances(
        &self,
        client: &dyn BankApiClient,
        scope: &[String],
        skipped: &mut Vec<SkippedAccount>,
    ) -> Result<usize> {
        let mut snapshots = Vec::with_capacity(scope.len());

        for account_id in scope {
            match client.get_balance(account_id).await {
                Ok(remote) => {
                    let snapshot =
                        balance_from_remote(account_id, &remote, Utc::now().naive_utc());
                    debug!(
                        "Balance for {}: available {}, ledger {}",
                        account_id, snapshot.available, snapshot.ledger
                    );
                    snapshots.push(snapshot);
                }
                Err(e) => {
                    warn!("Failed to fetch balance for account {}: {}", account_id, e);
                    skipped.push(SkippedAccount {
                        account_id: Some(account_id.clone()),
                        stage: SyncStage::Balances,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let inserted = self.balance_repository.insert_many(snapshots).await?;
        info!("Balances synced: {} snapshots", inserted);
        Ok(inserted)
    }

    /// Inserts transactions not stored yet. Existing ids are never touched.
    pub async fn sync_transactions(
        &self,
        client: &dyn BankApiClient,
        scope: &[String],
        skipped: &mut Vec<SkippedAccount>,
    ) -> Result<usize> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut pending = Vec::new();

        for account_id in scope {
            let remote_transactions = match client
                .list_transactions(account_id, self.config.transaction_page_size)
                .await
            {
                Ok(list) => list,
                Err(e) => {
                    warn!(
                        "Failed to fetch transactions for account {}: {}",
                        account_id, e
                    );
                    skipped.push(SkippedAccount {
                        account_id: Some(account_id.clone()),
                        stage: SyncStage::Transactions,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let ids: Vec<String> = remote_transactions
                .iter()
                .filter_map(|t| remote_id(t.id.as_deref()))
                .collect();
            let existing = self.transaction_repository.existing_ids(&ids)?;

            for remote in &remote_transactions {
                let Some(transaction_id) = remote_id(remote.id.as_deref()) else {
                    skipped.push(SkippedAccount {
                        account_id: Some(account_id.clone()),
                        stage: SyncStage::Transactions,
                        reason: "transaction record has no id".to_string(),
                    });
                    continue;
                };
                if existing.contains(&transaction_id) || !seen.insert(transaction_id.clone()) {
                    continue;
                }

                match transaction_from_remote(account_id, &transaction_id, remote) {
                    Ok(new_transaction) => {
                        debug!("New transaction {} on {}", transaction_id, account_id);
                        pending.push(new_transaction);
                    }
                    Err(e) => {
                        warn!(
                            "Skipping transaction {} on account {}: {}",
                            transaction_id, account_id, e
                        );
                        skipped.push(SkippedAccount {
                            account_id: Some(account_id.clone()),
                            stage: SyncStage::Transactions,
                            reason: format!("transaction {}: {}", transaction_id, e),
                        });
                    }
                }
            }
        }

        let inserted = self.transaction_repository.insert_new(pending).await?;
        info!("Transactions synced: {} new", inserted);
        Ok(inserted)
    }
}
