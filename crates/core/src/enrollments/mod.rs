//! Enrollments module - credentials linking a user to a remote institution session.

mod enrollments_model;
mod enrollments_traits;


pub use enrollments_model::{EnrollmentRequest, NewEnrollment, UserEnrollment};
pub use enrollments_traits::EnrollmentRepositoryTrait;
