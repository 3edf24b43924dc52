//! SQLite storage implementation for Teller Home.
//!
//! This crate provides all database-related functionality using Diesel with SQLite.
//! It implements the repository traits defined in `tellerhome-core` and contains:
//! - Database connection pooling and management
//! - Embedded Diesel migrations
//! - Repository implementations for every domain entity
//! - Database-specific model types (with Diesel derives)
//!
//! This crate is the only place in the workspace where Diesel appears.
//!
//! ```text
//! core (domain)          connect (sync)
//!       │                      │
//!       └──────────┬───────────┘
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod accounts;
pub mod balances;
pub mod enrollments;
pub mod scheduled_payments;
pub mod transactions;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export repositories
pub use accounts::AccountRepository;
pub use balances::BalanceRepository;
pub use enrollments::EnrollmentRepository;
pub use scheduled_payments::ScheduledPaymentRepository;
pub use transactions::TransactionRepository;

pub use tellerhome_core::errors::{DatabaseError, Error, Result};
