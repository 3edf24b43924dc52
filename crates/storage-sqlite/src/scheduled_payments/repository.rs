use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;

use tellerhome_core::errors::{Error, Result};
use tellerhome_core::scheduled_payments::{
    NewScheduledPayment, ScheduledPayment, ScheduledPaymentRepositoryTrait,
};

use super::model::{NewScheduledPaymentDB, ScheduledPaymentDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::scheduled_payments;
use crate::schema::scheduled_payments::dsl;

pub struct ScheduledPaymentRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl ScheduledPaymentRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl ScheduledPaymentRepositoryTrait for ScheduledPaymentRepository {
    async fn create(&self, payment: NewScheduledPayment) -> Result<ScheduledPayment> {
        let row = NewScheduledPaymentDB::from_domain(payment, Utc::now().naive_utc());

        self.writer
            .exec(move |conn| {
                diesel::insert_into(scheduled_payments::table)
                    .values(&row)
                    .returning(ScheduledPaymentDB::as_returning())
                    .get_result::<ScheduledPaymentDB>(conn)
                    .into_core()
                    .and_then(ScheduledPayment::try_from)
            })
            .await
    }

    async fn deactivate(&self, payment_id: i32) -> Result<()> {
        self.writer
            .exec(move |conn| {
                let affected = diesel::update(
                    scheduled_payments::table
                        .find(payment_id)
                        .filter(dsl::is_active.eq(true)),
                )
                .set((
                    dsl::is_active.eq(false),
                    dsl::updated_at.eq(Utc::now().naive_utc()),
                ))
                .execute(conn)
                .into_core()?;
                if affected == 0 {
                    return Err(Error::not_found("ScheduledPayment", payment_id.to_string()));
                }
                Ok(())
            })
            .await
    }

    fn list_active(&self) -> Result<Vec<ScheduledPayment>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = scheduled_payments::table
            .filter(dsl::is_active.eq(true))
            .order((dsl::day_of_month.asc(), dsl::id.asc()))
            .select(ScheduledPaymentDB::as_select())
            .load::<ScheduledPaymentDB>(&mut conn)
            .into_core()?;

        rows.into_iter().map(ScheduledPayment::try_from).collect()
    }
}
