use std::sync::Arc;

use log::debug;

use super::scheduled_payments_model::{NewScheduledPayment, ScheduledPayment};
use super::scheduled_payments_traits::{
    ScheduledPaymentRepositoryTrait, ScheduledPaymentServiceTrait,
};
use crate::errors::Result;

pub struct ScheduledPaymentService {
    repository: Arc<dyn ScheduledPaymentRepositoryTrait>,
}

impl ScheduledPaymentService {
    pub fn new(repository: Arc<dyn ScheduledPaymentRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl ScheduledPaymentServiceTrait for ScheduledPaymentService {
    async fn create_payment(&self, mut payment: NewScheduledPayment) -> Result<ScheduledPayment> {
        payment.validate()?;
        payment.name = payment.name.trim().to_string();
        debug!(
            "Creating scheduled payment '{}' on day {}",
            payment.name, payment.day_of_month
        );
        self.repository.create(payment).await
    }

    async fn delete_payment(&self, payment_id: i32) -> Result<()> {
        self.repository.deactivate(payment_id).await
    }

    fn list_active_payments(&self) -> Result<Vec<ScheduledPayment>> {
        self.repository.list_active()
    }
}
