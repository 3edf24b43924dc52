use async_trait::async_trait;

use super::scheduled_payments_model::{NewScheduledPayment, ScheduledPayment};
use crate::errors::Result;

#[async_trait]
pub trait ScheduledPaymentRepositoryTrait: Send + Sync {
    async fn create(&self, payment: NewScheduledPayment) -> Result<ScheduledPayment>;

    /// Clears `is_active`. Unknown or already inactive ids are `NotFound`.
    async fn deactivate(&self, payment_id: i32) -> Result<()>;

    fn list_active(&self) -> Result<Vec<ScheduledPayment>>;
}

#[async_trait]
pub trait ScheduledPaymentServiceTrait: Send + Sync {
    async fn create_payment(&self, payment: NewScheduledPayment) -> Result<ScheduledPayment>;

    async fn delete_payment(&self, payment_id: i32) -> Result<()>;

    fn list_active_payments(&self) -> Result<Vec<ScheduledPayment>>;
}
