//! Credential lifecycle and batch synchronization over stored enrollments.

mod models;
mod service;


pub use models::{BatchSyncSummary, EnrollOutcome, EnrollmentFailure};
pub use service::EnrollmentService;
