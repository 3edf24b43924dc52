//! Teller Home Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for Teller Home.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate and consumed by the `connect` crate.

pub mod accounts;
pub mod balances;
pub mod constants;
pub mod enrollments;
pub mod errors;
pub mod forecast;
pub mod scheduled_payments;
pub mod secrets;
pub mod transactions;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
