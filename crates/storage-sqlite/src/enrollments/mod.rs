//! SQLite storage implementation for user enrollments.

mod model;
mod repository;

pub use model::{NewUserEnrollmentDB, UserEnrollmentDB};
pub use repository::EnrollmentRepository;
