use chrono::NaiveDateTime;
use diesel::prelude::*;

use tellerhome_core::balances::{Balance, NewBalance};
use tellerhome_core::errors::{Error, Result};

use crate::errors::parse_stored_decimal;

#[derive(Queryable, QueryableByName, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::balances)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BalanceDB {
    pub id: i32,
    pub account_id: String,
    pub available: String,
    pub ledger: String,
    pub captured_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::balances)]
pub struct NewBalanceDB {
    pub account_id: String,
    pub available: String,
    pub ledger: String,
    pub captured_at: NaiveDateTime,
}

impl TryFrom<BalanceDB> for Balance {
    type Error = Error;

    fn try_from(db: BalanceDB) -> Result<Self> {
        Ok(Self {
            id: db.id,
            available: parse_stored_decimal("balances.available", &db.available)?,
            ledger: parse_stored_decimal("balances.ledger", &db.ledger)?,
            account_id: db.account_id,
            captured_at: db.captured_at,
        })
    }
}

impl From<NewBalance> for NewBalanceDB {
    fn from(domain: NewBalance) -> Self {
        Self {
            account_id: domain.account_id,
            available: domain.available.to_string(),
            ledger: domain.ledger.to_string(),
            captured_at: domain.captured_at,
        }
    }
}
