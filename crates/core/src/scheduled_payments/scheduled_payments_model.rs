//! Scheduled payment domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::utils::decimal_utils::deserialize_decimal;
use crate::Error;

/// How often a scheduled payment repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentFrequency {
    #[default]
    Monthly,
    Yearly,
    OneTime,
}

impl PaymentFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentFrequency::Monthly => "monthly",
            PaymentFrequency::Yearly => "yearly",
            PaymentFrequency::OneTime => "one-time",
        }
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentFrequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "monthly" => Ok(PaymentFrequency::Monthly),
            "yearly" => Ok(PaymentFrequency::Yearly),
            "one-time" => Ok(PaymentFrequency::OneTime),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown payment frequency '{}'",
                other
            )))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledPayment {
    pub id: i32,
    pub name: String,
    pub amount: Decimal,
    pub account_id: Option<String>,
    pub day_of_month: i32,
    /// Soft delete flag
    pub is_active: bool,
    pub is_recurring: bool,
    pub frequency: PaymentFrequency,
    pub email: Option<String>,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a scheduled payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewScheduledPayment {
    pub name: String,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub amount: Decimal,
    #[serde(default)]
    pub account_id: Option<String>,
    pub day_of_month: i32,
    #[serde(default = "default_true")]
    pub is_recurring: bool,
    #[serde(default)]
    pub frequency: PaymentFrequency,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_true() -> bool {
    true
}

impl NewScheduledPayment {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Payment name cannot be empty".to_string(),
            )));
        }
        if !(1..=31).contains(&self.day_of_month) {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "day_of_month must be between 1 and 31, got {}",
                self.day_of_month
            ))));
        }
        Ok(())
    }
}
