use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use log::warn;

use tellerhome_core::errors::{Error, Result};
use tellerhome_core::scheduled_payments::{
    NewScheduledPayment, PaymentFrequency, ScheduledPayment,
};

use crate::errors::parse_stored_decimal;

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::scheduled_payments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ScheduledPaymentDB {
    pub id: i32,
    pub name: String,
    pub amount: String,
    pub account_id: Option<String>,
    pub day_of_month: i32,
    pub is_active: bool,
    pub is_recurring: bool,
    pub frequency: String,
    pub email: Option<String>,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::scheduled_payments)]
pub struct NewScheduledPaymentDB {
    pub name: String,
    pub amount: String,
    pub account_id: Option<String>,
    pub day_of_month: i32,
    pub is_active: bool,
    pub is_recurring: bool,
    pub frequency: String,
    pub email: Option<String>,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<ScheduledPaymentDB> for ScheduledPayment {
    type Error = Error;

    fn try_from(db: ScheduledPaymentDB) -> Result<Self> {
        let frequency = PaymentFrequency::from_str(&db.frequency).unwrap_or_else(|_| {
            warn!(
                "Scheduled payment {} has unknown frequency '{}', treating as monthly",
                db.id, db.frequency
            );
            PaymentFrequency::Monthly
        });
        Ok(Self {
            amount: parse_stored_decimal("scheduled_payments.amount", &db.amount)?,
            id: db.id,
            name: db.name,
            account_id: db.account_id,
            day_of_month: db.day_of_month,
            is_active: db.is_active,
            is_recurring: db.is_recurring,
            frequency,
            email: db.email,
            category: db.category,
            notes: db.notes,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl NewScheduledPaymentDB {
    pub(crate) fn from_domain(domain: NewScheduledPayment, now: NaiveDateTime) -> Self {
        Self {
            name: domain.name,
            amount: domain.amount.to_string(),
            account_id: domain.account_id,
            day_of_month: domain.day_of_month,
            is_active: true,
            is_recurring: domain.is_recurring,
            frequency: domain.frequency.as_str().to_string(),
            email: domain.email,
            category: domain.category,
            notes: domain.notes,
            created_at: now,
            updated_at: now,
        }
    }
}
