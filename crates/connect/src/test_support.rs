//! Shared fixtures for the engine and enrollment tests: an in-memory store
//! implementing the repository traits and a scripted remote.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde_json::json;

use tellerhome_core::accounts::{
    Account, AccountRepositoryTrait, AccountUpsert, AccountUpsertSummary,
};
use tellerhome_core::balances::{Balance, BalanceRepositoryTrait, NewBalance};
use tellerhome_core::errors::{DatabaseError, Error, RemoteError, Result};
use tellerhome_core::transactions::{NewTransaction, Transaction, TransactionRepositoryTrait};

use crate::models::{TellerAccount, TellerBalance, TellerTransaction};
use crate::sync::SyncService;
use crate::traits::{BankApiClient, BankApiClientFactory};

// ─────────────────────────────────────────────────────────────────────────────
// In-memory store
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub(crate) struct MemoryStore {
    pub accounts: Mutex<Vec<Account>>,
    pub balances: Mutex<Vec<Balance>>,
    pub transactions: Mutex<Vec<Transaction>>,
    pub fail_balance_writes: bool,
}

impl MemoryStore {
    pub fn set_alias(&self, account_id: &str, alias: &str) {
        let mut accounts = self.accounts.lock().unwrap();
        let acc = accounts.iter_mut().find(|a| a.id == account_id).unwrap();
        acc.display_name = Some(alias.to_string());
    }

    pub fn seed_account(&self, account_id: &str) {
        self.accounts.lock().unwrap().push(Account {
            id: account_id.to_string(),
            name: "Seeded".to_string(),
            display_name: None,
            account_type: "depository".to_string(),
            subtype: None,
            institution_name: None,
            currency: "USD".to_string(),
            status: "open".to_string(),
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        });
    }
}

#[async_trait]
impl AccountRepositoryTrait for MemoryStore {
    async fn upsert_synced(&self, upserts: Vec<AccountUpsert>) -> Result<AccountUpsertSummary> {
        let mut accounts = self.accounts.lock().unwrap();
        let mut summary = AccountUpsertSummary::default();
        let now = chrono::Utc::now().naive_utc();
        for u in upserts {
            if let Some(existing) = accounts.iter_mut().find(|a| a.id == u.id) {
                existing.name = u.name;
                existing.account_type = u.account_type;
                existing.subtype = u.subtype;
                existing.institution_name = u.institution_name;
                existing.currency = u.currency;
                existing.status = u.status;
                existing.updated_at = now;
                summary.updated += 1;
            } else {
                accounts.push(Account {
                    id: u.id,
                    name: u.name,
                    display_name: None,
                    account_type: u.account_type,
                    subtype: u.subtype,
                    institution_name: u.institution_name,
                    currency: u.currency,
                    status: u.status,
                    created_at: now,
                    updated_at: now,
                });
                summary.inserted += 1;
            }
        }
        Ok(summary)
    }

    async fn set_display_name(&self, _id: &str, _name: Option<String>) -> Result<Account> {
        unimplemented!()
    }

    fn get_by_id(&self, account_id: &str) -> Result<Account> {
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == account_id)
            .cloned()
            .ok_or_else(|| Error::not_found("Account", account_id))
    }

    fn list(&self) -> Result<Vec<Account>> {
        Ok(self.accounts.lock().unwrap().clone())
    }
}

#[async_trait]
impl BalanceRepositoryTrait for MemoryStore {
    async fn insert_many(&self, new_balances: Vec<NewBalance>) -> Result<usize> {
        if self.fail_balance_writes {
            return Err(Error::Database(DatabaseError::QueryFailed(
                "disk I/O error".to_string(),
            )));
        }
        let mut balances = self.balances.lock().unwrap();
        let count = new_balances.len();
        for b in new_balances {
            let id = balances.len() as i32 + 1;
            balances.push(Balance {
                id,
                account_id: b.account_id,
                available: b.available,
                ledger: b.ledger,
                captured_at: b.captured_at,
            });
        }
        Ok(count)
    }

    async fn prune_before(&self, _cutoff: NaiveDateTime) -> Result<usize> {
        unimplemented!()
    }

    fn latest_for_account(&self, account_id: &str) -> Result<Option<Balance>> {
        Ok(self
            .balances
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|b| b.account_id == account_id)
            .cloned())
    }

    fn list_latest(&self) -> Result<HashMap<String, Balance>> {
        let mut latest = HashMap::new();
        for b in self.balances.lock().unwrap().iter() {
            latest.insert(b.account_id.clone(), b.clone());
        }
        Ok(latest)
    }

    fn list_for_account(&self, account_id: &str) -> Result<Vec<Balance>> {
        Ok(self
            .balances
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.account_id == account_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl TransactionRepositoryTrait for MemoryStore {
    fn existing_ids(&self, ids: &[String]) -> Result<HashSet<String>> {
        let stored = self.transactions.lock().unwrap();
        Ok(ids
            .iter()
            .filter(|id| stored.iter().any(|t| &t.id == *id))
            .cloned()
            .collect())
    }

    async fn insert_new(&self, new_transactions: Vec<NewTransaction>) -> Result<usize> {
        let mut stored = self.transactions.lock().unwrap();
        let mut inserted = 0;
        for t in new_transactions {
            if stored.iter().any(|s| s.id == t.id) {
                continue;
            }
            stored.push(Transaction {
                id: t.id,
                account_id: t.account_id,
                amount: t.amount,
                date: t.date,
                description: t.description,
                category: t.category,
                transaction_type: t.transaction_type,
                status: t.status,
                created_at: chrono::Utc::now().naive_utc(),
            });
            inserted += 1;
        }
        Ok(inserted)
    }

    fn list_for_account(&self, account_id: &str, limit: i64) -> Result<Vec<Transaction>> {
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.account_id == account_id)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scripted remote
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub(crate) struct ScriptedClient {
    pub accounts: Vec<TellerAccount>,
    pub list_error: Option<RemoteError>,
    pub balances: HashMap<String, std::result::Result<TellerBalance, RemoteError>>,
    pub transactions: HashMap<String, std::result::Result<Vec<TellerTransaction>, RemoteError>>,
    pub calls: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn with_account(mut self, id: &str, name: &str) -> Self {
        self.accounts.push(TellerAccount {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            account_type: Some("depository".to_string()),
            ..Default::default()
        });
        self
    }

    pub fn with_balance(mut self, id: &str, available: &str, ledger: &str) -> Self {
        self.balances.insert(
            id.to_string(),
            Ok(TellerBalance {
                account_id: Some(id.to_string()),
                available: Some(json!(available)),
                ledger: Some(json!(ledger)),
            }),
        );
        self
    }

    pub fn with_transactions(mut self, id: &str, txns: Vec<TellerTransaction>) -> Self {
        self.transactions.insert(id.to_string(), Ok(txns));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

pub(crate) fn remote_txn(id: &str, amount: &str, date: &str, description: &str) -> TellerTransaction {
    TellerTransaction {
        id: Some(id.to_string()),
        amount: Some(json!(amount)),
        date: Some(date.to_string()),
        description: Some(description.to_string()),
        ..Default::default()
    }
}

pub(crate) fn server_error() -> RemoteError {
    RemoteError::Status {
        status: 502,
        message: "bad gateway".to_string(),
    }
}

#[async_trait]
impl BankApiClient for ScriptedClient {
    async fn list_accounts(&self) -> Result<Vec<TellerAccount>> {
        self.calls.lock().unwrap().push("accounts".to_string());
        match &self.list_error {
            Some(e) => Err(e.clone().into()),
            None => Ok(self.accounts.clone()),
        }
    }

    async fn get_balance(&self, account_id: &str) -> Result<TellerBalance> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("balance:{}", account_id));
        match self.balances.get(account_id) {
            Some(Ok(b)) => Ok(b.clone()),
            Some(Err(e)) => Err(e.clone().into()),
            None => Ok(TellerBalance::default()),
        }
    }

    async fn list_transactions(
        &self,
        account_id: &str,
        max_count: u32,
    ) -> Result<Vec<TellerTransaction>> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("transactions:{}:{}", account_id, max_count));
        match self.transactions.get(account_id) {
            Some(Ok(list)) => Ok(list.clone()),
            Some(Err(e)) => Err(e.clone().into()),
            None => Ok(Vec::new()),
        }
    }
}

pub(crate) fn engine(store: &Arc<MemoryStore>) -> SyncService {
    SyncService::new(store.clone(), store.clone(), store.clone())
}

pub(crate) fn coffee_client() -> ScriptedClient {
    ScriptedClient::default()
        .with_account("a1", "Checking")
        .with_balance("a1", "100.00", "100.00")
        .with_transactions(
            "a1",
            vec![remote_txn("t1", "-5.00", "2024-06-01T00:00:00Z", "Coffee")],
        )
}

#[async_trait]
impl BankApiClient for Arc<ScriptedClient> {
    async fn list_accounts(&self) -> Result<Vec<TellerAccount>> {
        self.as_ref().list_accounts().await
    }

    async fn get_balance(&self, account_id: &str) -> Result<TellerBalance> {
        self.as_ref().get_balance(account_id).await
    }

    async fn list_transactions(
        &self,
        account_id: &str,
        max_count: u32,
    ) -> Result<Vec<TellerTransaction>> {
        self.as_ref().list_transactions(account_id, max_count).await
    }
}

/// Hands out the scripted client registered for each access token and
/// records which tokens were requested.
#[derive(Default)]
pub(crate) struct ScriptedFactory {
    pub clients: HashMap<String, Arc<ScriptedClient>>,
    pub requested: Mutex<Vec<String>>,
}

impl ScriptedFactory {
    pub fn with_client(mut self, token: &str, client: ScriptedClient) -> Self {
        self.clients.insert(token.to_string(), Arc::new(client));
        self
    }
}

impl BankApiClientFactory for ScriptedFactory {
    fn create(&self, access_token: &str) -> Result<Box<dyn BankApiClient>> {
        self.requested
            .lock()
            .unwrap()
            .push(access_token.to_string());
        // unknown tokens behave like a revoked credential
        let client = self.clients.get(access_token).cloned().unwrap_or_else(|| {
            Arc::new(ScriptedClient {
                list_error: Some(RemoteError::Status {
                    status: 401,
                    message: "invalid access token".to_string(),
                }),
                ..Default::default()
            })
        });
        Ok(Box::new(client))
    }
}
