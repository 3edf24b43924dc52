pub mod decimal_utils;
pub mod time_utils;

pub use decimal_utils::parse_amount;
pub use time_utils::{parse_remote_datetime, parse_remote_datetime_or_now};
