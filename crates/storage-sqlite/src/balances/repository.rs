use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sql_types::Timestamp;
use diesel::sqlite::SqliteConnection;
use log::debug;

use tellerhome_core::balances::{Balance, BalanceRepositoryTrait, NewBalance};
use tellerhome_core::errors::Result;

use super::model::{BalanceDB, NewBalanceDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::balances;

/// Id of the newest snapshot for the account of the outer row `b`.
const LATEST_ID_FOR_ROW: &str = "(SELECT b2.id FROM balances b2 \
     WHERE b2.account_id = b.account_id \
     ORDER BY b2.captured_at DESC, b2.id DESC LIMIT 1)";

pub struct BalanceRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl BalanceRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl BalanceRepositoryTrait for BalanceRepository {
    async fn insert_many(&self, new_balances: Vec<NewBalance>) -> Result<usize> {
        if new_balances.is_empty() {
            return Ok(0);
        }
        let rows: Vec<NewBalanceDB> = new_balances.into_iter().map(NewBalanceDB::from).collect();

        self.writer
            .exec(move |conn| {
                diesel::insert_into(balances::table)
                    .values(&rows)
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    async fn prune_before(&self, cutoff: NaiveDateTime) -> Result<usize> {
        let removed = self
            .writer
            .exec(move |conn| {
                diesel::sql_query(format!(
                    "DELETE FROM balances WHERE captured_at < ? AND id NOT IN \
                     (SELECT {} FROM (SELECT DISTINCT account_id FROM balances) b)",
                    LATEST_ID_FOR_ROW
                ))
                .bind::<Timestamp, _>(cutoff)
                .execute(conn)
                .into_core()
            })
            .await?;
        debug!("Pruned {} balance snapshots older than {}", removed, cutoff);
        Ok(removed)
    }

    fn latest_for_account(&self, target_account: &str) -> Result<Option<Balance>> {
        let mut conn = get_connection(&self.pool)?;

        balances::table
            .filter(balances::account_id.eq(target_account))
            .order((balances::captured_at.desc(), balances::id.desc()))
            .select(BalanceDB::as_select())
            .first::<BalanceDB>(&mut conn)
            .optional()
            .into_core()?
            .map(Balance::try_from)
            .transpose()
    }

    fn list_latest(&self) -> Result<HashMap<String, Balance>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = diesel::sql_query(format!(
            "SELECT b.id, b.account_id, b.available, b.ledger, b.captured_at \
             FROM balances b WHERE b.id = {}",
            LATEST_ID_FOR_ROW
        ))
        .load::<BalanceDB>(&mut conn)
        .into_core()?;

        rows.into_iter()
            .map(|row| Ok((row.account_id.clone(), Balance::try_from(row)?)))
            .collect()
    }

    fn list_for_account(&self, target_account: &str) -> Result<Vec<Balance>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = balances::table
            .filter(balances::account_id.eq(target_account))
            .order((balances::captured_at.desc(), balances::id.desc()))
            .select(BalanceDB::as_select())
            .load::<BalanceDB>(&mut conn)
            .into_core()?;

        rows.into_iter().map(Balance::try_from).collect()
    }
}
