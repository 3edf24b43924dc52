use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::enrollments_model::{NewEnrollment, UserEnrollment};
use crate::errors::Result;

#[async_trait]
pub trait EnrollmentRepositoryTrait: Send + Sync {
    /// Inserts a new enrollment, or for an existing `enrollment_id` replaces
    /// the token, reactivates it and overwrites the institution when one is given.
    async fn upsert(&self, enrollment: NewEnrollment) -> Result<UserEnrollment>;

    /// Soft-deactivates an enrollment. Unknown ids are `NotFound`.
    async fn deactivate(&self, enrollment_id: &str) -> Result<UserEnrollment>;

    async fn mark_synced(&self, enrollment_id: &str, synced_at: NaiveDateTime) -> Result<()>;

    fn get_by_enrollment_id(&self, enrollment_id: &str) -> Result<Option<UserEnrollment>>;

    fn list_active(&self) -> Result<Vec<UserEnrollment>>;

    fn list_active_for_user(&self, user_id: &str) -> Result<Vec<UserEnrollment>>;
}
