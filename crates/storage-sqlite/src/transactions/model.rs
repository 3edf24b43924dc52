use chrono::NaiveDateTime;
use diesel::prelude::*;

use tellerhome_core::errors::{Error, Result};
use tellerhome_core::transactions::{NewTransaction, Transaction};

use crate::errors::parse_stored_decimal;

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub account_id: String,
    pub amount: String,
    pub date: NaiveDateTime,
    pub description: String,
    pub category: Option<String>,
    pub transaction_type: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
pub struct NewTransactionDB {
    pub id: String,
    pub account_id: String,
    pub amount: String,
    pub date: NaiveDateTime,
    pub description: String,
    pub category: Option<String>,
    pub transaction_type: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<TransactionDB> for Transaction {
    type Error = Error;

    fn try_from(db: TransactionDB) -> Result<Self> {
        Ok(Self {
            amount: parse_stored_decimal("transactions.amount", &db.amount)?,
            id: db.id,
            account_id: db.account_id,
            date: db.date,
            description: db.description,
            category: db.category,
            transaction_type: db.transaction_type,
            status: db.status,
            created_at: db.created_at,
        })
    }
}

impl NewTransactionDB {
    pub(crate) fn from_domain(domain: NewTransaction, now: NaiveDateTime) -> Self {
        Self {
            id: domain.id,
            account_id: domain.account_id,
            amount: domain.amount.to_string(),
            date: domain.date,
            description: domain.description,
            category: domain.category,
            transaction_type: domain.transaction_type,
            status: domain.status,
            created_at: now,
        }
    }
}
