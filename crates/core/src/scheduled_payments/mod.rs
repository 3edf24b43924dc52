//! Scheduled payments - recurring bills and subscriptions used by the forecast.

mod scheduled_payments_model;
mod scheduled_payments_service;
mod scheduled_payments_traits;


pub use scheduled_payments_model::{NewScheduledPayment, PaymentFrequency, ScheduledPayment};
pub use scheduled_payments_service::ScheduledPaymentService;
pub use scheduled_payments_traits::{
    ScheduledPaymentRepositoryTrait, ScheduledPaymentServiceTrait,
};
