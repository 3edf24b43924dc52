//! Database model for accounts.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use tellerhome_core::accounts::{Account, AccountUpsert};

/// Database model for accounts
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountDB {
    pub id: String,
    pub name: String,
    pub display_name: Option<String>,
    pub account_type: String,
    pub subtype: Option<String>,
    pub institution_name: Option<String>,
    pub currency: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Remote-owned columns refreshed on every sync. `display_name` is not listed
/// so an update can never reach it.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::accounts)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct AccountSyncChangeset {
    pub name: String,
    pub account_type: String,
    pub subtype: Option<String>,
    pub institution_name: Option<String>,
    pub currency: String,
    pub status: String,
    pub updated_at: NaiveDateTime,
}

impl From<AccountDB> for Account {
    fn from(db: AccountDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            display_name: db.display_name,
            account_type: db.account_type,
            subtype: db.subtype,
            institution_name: db.institution_name,
            currency: db.currency,
            status: db.status,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl AccountDB {
    pub(crate) fn from_upsert(upsert: AccountUpsert, now: NaiveDateTime) -> Self {
        Self {
            id: upsert.id,
            name: upsert.name,
            display_name: None,
            account_type: upsert.account_type,
            subtype: upsert.subtype,
            institution_name: upsert.institution_name,
            currency: upsert.currency,
            status: upsert.status,
            created_at: now,
            updated_at: now,
        }
    }
}

impl AccountSyncChangeset {
    pub(crate) fn from_upsert(upsert: AccountUpsert, now: NaiveDateTime) -> Self {
        Self {
            name: upsert.name,
            account_type: upsert.account_type,
            subtype: upsert.subtype,
            institution_name: upsert.institution_name,
            currency: upsert.currency,
            status: upsert.status,
            updated_at: now,
        }
    }
}
