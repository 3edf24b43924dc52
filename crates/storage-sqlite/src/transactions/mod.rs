//! SQLite storage implementation for transactions.

mod model;
mod repository;

pub use model::{NewTransactionDB, TransactionDB};
pub use repository::TransactionRepository;
