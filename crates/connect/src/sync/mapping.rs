//! Conversion of remote records into local domain inputs, with defaults
//! for whatever the remote left out.

use chrono::NaiveDateTime;

use tellerhome_core::accounts::{AccountUpsert, DEFAULT_ACCOUNT_STATUS, DEFAULT_ACCOUNT_TYPE};
use tellerhome_core::balances::NewBalance;
use tellerhome_core::constants::{DEFAULT_CURRENCY, UNKNOWN_LABEL};
use tellerhome_core::errors::Result;
use tellerhome_core::transactions::{NewTransaction, DEFAULT_TRANSACTION_STATUS};
use tellerhome_core::utils::{parse_amount, parse_remote_datetime_or_now};

use crate::models::{TellerAccount, TellerBalance, TellerTransaction};

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Remote identifiers are trimmed; blank ones count as missing.
pub fn remote_id(value: Option<&str>) -> Option<String> {
    non_empty(value)
}

/// `None` when the record has no usable id.
pub fn account_upsert_from_remote(remote: &TellerAccount) -> Option<AccountUpsert> {
    let id = remote_id(remote.id.as_deref())?;
    Some(AccountUpsert {
        id,
        name: non_empty(remote.name.as_deref()).unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
        account_type: non_empty(remote.account_type.as_deref())
            .unwrap_or_else(|| DEFAULT_ACCOUNT_TYPE.to_string()),
        subtype: non_empty(remote.subtype.as_deref()),
        institution_name: remote
            .institution
            .as_ref()
            .and_then(|i| non_empty(i.name.as_deref())),
        currency: non_empty(remote.currency.as_deref())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        status: non_empty(remote.status.as_deref())
            .unwrap_or_else(|| DEFAULT_ACCOUNT_STATUS.to_string()),
    })
}

pub fn balance_from_remote(
    account_id: &str,
    remote: &TellerBalance,
    captured_at: NaiveDateTime,
) -> NewBalance {
    NewBalance {
        account_id: account_id.to_string(),
        available: parse_amount(remote.available.as_ref()),
        ledger: parse_amount(remote.ledger.as_ref()),
        captured_at,
    }
}

/// Fails only when the record carries a date that cannot be parsed.
/// The caller must already have checked that `id` is present.
pub fn transaction_from_remote(
    account_id: &str,
    transaction_id: &str,
    remote: &TellerTransaction,
) -> Result<NewTransaction> {
    Ok(NewTransaction {
        id: transaction_id.to_string(),
        account_id: account_id.to_string(),
        amount: parse_amount(remote.amount.as_ref()),
        date: parse_remote_datetime_or_now(remote.date.as_deref())?,
        description: non_empty(remote.description.as_deref())
            .unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
        category: remote.resolved_category(),
        transaction_type: non_empty(remote.transaction_type.as_deref()),
        status: non_empty(remote.status.as_deref())
            .unwrap_or_else(|| DEFAULT_TRANSACTION_STATUS.to_string()),
    })
}
