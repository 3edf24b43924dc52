//! SQLite storage implementation for scheduled payments.

mod model;
mod repository;

pub use model::{NewScheduledPaymentDB, ScheduledPaymentDB};
pub use repository::ScheduledPaymentRepository;
