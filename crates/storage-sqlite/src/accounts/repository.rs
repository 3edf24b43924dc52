use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use log::debug;
use std::sync::Arc;

use tellerhome_core::accounts::{
    Account, AccountRepositoryTrait, AccountUpsert, AccountUpsertSummary,
};
use tellerhome_core::errors::{Error, Result};

use super::model::{AccountDB, AccountSyncChangeset};
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::accounts;
use crate::schema::accounts::dsl::*;

/// Repository for managing account data in the database
pub struct AccountRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl AccountRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl AccountRepositoryTrait for AccountRepository {
    async fn upsert_synced(&self, upserts: Vec<AccountUpsert>) -> Result<AccountUpsertSummary> {
        self.writer
            .exec(move |conn| {
                let now = Utc::now().naive_utc();
                let mut summary = AccountUpsertSummary::default();

                for upsert in upserts {
                    let existing = accounts
                        .find(&upsert.id)
                        .select(id)
                        .first::<String>(conn)
                        .optional()
                        .into_core()?;

                    if existing.is_some() {
                        debug!("Updating account {}", upsert.id);
                        let target = upsert.id.clone();
                        diesel::update(accounts.find(target))
                            .set(AccountSyncChangeset::from_upsert(upsert, now))
                            .execute(conn)
                            .into_core()?;
                        summary.updated += 1;
                    } else {
                        debug!("Inserting account {}", upsert.id);
                        diesel::insert_into(accounts::table)
                            .values(AccountDB::from_upsert(upsert, now))
                            .execute(conn)
                            .into_core()?;
                        summary.inserted += 1;
                    }
                }

                Ok(summary)
            })
            .await
    }

    async fn set_display_name(
        &self,
        account_id: &str,
        alias: Option<String>,
    ) -> Result<Account> {
        let account_id = account_id.to_string();
        self.writer
            .exec(move |conn| {
                let affected = diesel::update(accounts.find(&account_id))
                    .set((
                        display_name.eq(alias),
                        updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .into_core()?;
                if affected == 0 {
                    return Err(Error::not_found("Account", account_id));
                }

                accounts
                    .find(&account_id)
                    .select(AccountDB::as_select())
                    .first::<AccountDB>(conn)
                    .map(Account::from)
                    .into_core()
            })
            .await
    }

    fn get_by_id(&self, account_id: &str) -> Result<Account> {
        let mut conn = get_connection(&self.pool)?;

        accounts
            .select(AccountDB::as_select())
            .find(account_id)
            .first::<AccountDB>(&mut conn)
            .optional()
            .into_core()?
            .map(Account::from)
            .ok_or_else(|| Error::not_found("Account", account_id))
    }

    fn list(&self) -> Result<Vec<Account>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = accounts
            .select(AccountDB::as_select())
            .order(id.asc())
            .load::<AccountDB>(&mut conn)
            .into_core()?;

        Ok(rows.into_iter().map(Account::from).collect())
    }
}
