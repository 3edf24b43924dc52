use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Reads a remote amount that may be a JSON string or number.
///
/// Null, missing or unparseable values yield zero.
pub fn parse_amount(value: Option<&Value>) -> Decimal {
    value.and_then(decimal_from_value).unwrap_or(Decimal::ZERO)
}

fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            Decimal::from_str(s)
                .or_else(|_| Decimal::from_scientific(s))
                .ok()
        }
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Decimal::from(i))
            } else {
                // Go through the shortest textual form so 0.1 stays 0.1
                Decimal::from_str(&n.to_string())
                    .ok()
                    .or_else(|| n.as_f64().and_then(Decimal::from_f64))
            }
        }
        _ => None,
    }
}

/// Strict serde helper for user input: accepts a string or a number, rejects anything else.
pub fn deserialize_decimal<'de, D>(deserializer: D) -> std::result::Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    decimal_from_value(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid decimal amount: {}", value)))
}
