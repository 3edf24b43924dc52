use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;

use tellerhome_core::errors::Result;
use tellerhome_core::transactions::{NewTransaction, Transaction, TransactionRepositoryTrait};

use super::model::{NewTransactionDB, TransactionDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::transactions;

// Keeps `IN (...)` lists well under SQLite's bound-parameter limit.
const ID_LOOKUP_CHUNK: usize = 500;

pub struct TransactionRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    fn existing_ids(&self, ids: &[String]) -> Result<HashSet<String>> {
        let mut conn = get_connection(&self.pool)?;
        let mut found = HashSet::new();

        for chunk in ids.chunks(ID_LOOKUP_CHUNK) {
            let rows = transactions::table
                .filter(transactions::id.eq_any(chunk))
                .select(transactions::id)
                .load::<String>(&mut conn)
                .into_core()?;
            found.extend(rows);
        }

        Ok(found)
    }

    async fn insert_new(&self, new_transactions: Vec<NewTransaction>) -> Result<usize> {
        if new_transactions.is_empty() {
            return Ok(0);
        }
        let now = Utc::now().naive_utc();
        let rows: Vec<NewTransactionDB> = new_transactions
            .into_iter()
            .map(|t| NewTransactionDB::from_domain(t, now))
            .collect();

        self.writer
            .exec(move |conn| {
                let mut inserted = 0;
                for row in &rows {
                    inserted += diesel::insert_or_ignore_into(transactions::table)
                        .values(row)
                        .execute(conn)
                        .into_core()?;
                }
                Ok(inserted)
            })
            .await
    }

    fn list_for_account(&self, account_id: &str, limit: i64) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = transactions::table
            .filter(transactions::account_id.eq(account_id))
            .order((transactions::date.desc(), transactions::id.asc()))
            .limit(limit)
            .select(TransactionDB::as_select())
            .load::<TransactionDB>(&mut conn)
            .into_core()?;

        rows.into_iter().map(Transaction::try_from).collect()
    }
}
