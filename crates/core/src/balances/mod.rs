//! Balance snapshots - append-only history of account balances.

mod balances_model;
mod balances_traits;

pub use balances_model::{Balance, NewBalance};
pub use balances_traits::BalanceRepositoryTrait;
