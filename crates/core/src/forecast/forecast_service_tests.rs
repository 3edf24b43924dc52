use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::balances::{Balance, BalanceRepositoryTrait, NewBalance};
use crate::errors::Result;
use crate::scheduled_payments::{
    NewScheduledPayment, PaymentFrequency, ScheduledPayment, ScheduledPaymentRepositoryTrait,
};

struct FixedBalances(Vec<Balance>);

#[async_trait]
impl BalanceRepositoryTrait for FixedBalances {
    async fn insert_many(&self, _balances: Vec<NewBalance>) -> Result<usize> {
        unimplemented!()
    }

    async fn prune_before(&self, _cutoff: NaiveDateTime) -> Result<usize> {
        unimplemented!()
    }

    fn latest_for_account(&self, account_id: &str) -> Result<Option<Balance>> {
        Ok(self.0.iter().find(|b| b.account_id == account_id).cloned())
    }

    fn list_latest(&self) -> Result<HashMap<String, Balance>> {
        Ok(self
            .0
            .iter()
            .map(|b| (b.account_id.clone(), b.clone()))
            .collect())
    }

    fn list_for_account(&self, account_id: &str) -> Result<Vec<Balance>> {
        Ok(self
            .0
            .iter()
            .filter(|b| b.account_id == account_id)
            .cloned()
            .collect())
    }
}

struct FixedPayments(Vec<ScheduledPayment>);

#[async_trait]
impl ScheduledPaymentRepositoryTrait for FixedPayments {
    async fn create(&self, _payment: NewScheduledPayment) -> Result<ScheduledPayment> {
        unimplemented!()
    }

    async fn deactivate(&self, _payment_id: i32) -> Result<()> {
        unimplemented!()
    }

    fn list_active(&self) -> Result<Vec<ScheduledPayment>> {
        Ok(self.0.clone())
    }
}

fn balance(account_id: &str, available: Decimal) -> Balance {
    Balance {
        id: 1,
        account_id: account_id.to_string(),
        available,
        ledger: available,
        captured_at: NaiveDateTime::default(),
    }
}

fn payment(name: &str, amount: Decimal, day: i32) -> ScheduledPayment {
    ScheduledPayment {
        id: 1,
        name: name.to_string(),
        amount,
        account_id: None,
        day_of_month: day,
        is_active: true,
        is_recurring: true,
        frequency: PaymentFrequency::Monthly,
        email: None,
        category: None,
        notes: None,
        created_at: NaiveDateTime::default(),
        updated_at: NaiveDateTime::default(),
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_project_days_carries_balance_forward() {
    let payments = vec![
        payment("Rent", dec!(1000), 1),
        payment("Phone", dec!(45.50), 3),
        payment("Gym", dec!(30), 3),
    ];
    let days = project_days(dec!(2500), &payments, date(2024, 6, 1), 7);

    assert_eq!(days.len(), 7);
    assert_eq!(days[0].date, date(2024, 6, 1));
    assert_eq!(days[0].day_name, "Saturday");
    assert_eq!(days[0].starting_balance, dec!(2500));
    assert_eq!(days[0].total_payments, dec!(1000));
    assert_eq!(days[0].ending_balance, dec!(1500));

    assert_eq!(days[1].starting_balance, dec!(1500));
    assert!(days[1].payments.is_empty());

    assert_eq!(days[2].payments.len(), 2);
    assert_eq!(days[2].total_payments, dec!(75.50));
    assert_eq!(days[2].ending_balance, dec!(1424.50));
    assert_eq!(days[6].ending_balance, dec!(1424.50));
}

#[test]
fn test_project_days_spans_month_boundary() {
    let payments = vec![payment("Card", dec!(20), 2), payment("Ghost", dec!(5), 31)];
    let days = project_days(dec!(100), &payments, date(2024, 4, 28), 7);

    // April has no 31st, so the day-31 payment never fires in this window
    let total: Decimal = days.iter().map(|d| d.total_payments).sum();
    assert_eq!(total, dec!(20));
    assert_eq!(days[4].date, date(2024, 5, 2));
    assert_eq!(days[4].total_payments, dec!(20));
}

#[test]
fn test_project_days_rounds_for_display() {
    let days = project_days(dec!(10.005), &[payment("x", dec!(0.333), 1)], date(2024, 1, 1), 1);
    assert_eq!(days[0].starting_balance, dec!(10.00));
    assert_eq!(days[0].total_payments, dec!(0.33));
    assert_eq!(days[0].ending_balance, dec!(9.67));
}

#[test]
fn test_weekly_forecast_sums_latest_available() {
    let service = ForecastService::new(
        Arc::new(FixedBalances(vec![
            balance("a1", dec!(100.25)),
            balance("a2", dec!(50.75)),
        ])),
        Arc::new(FixedPayments(vec![payment("Coffee club", dec!(11), 16)])),
    );

    let forecast = service.weekly_forecast(date(2024, 6, 15)).unwrap();
    assert_eq!(forecast.forecast.len(), 7);
    assert_eq!(forecast.forecast[0].starting_balance, dec!(151));
    assert_eq!(forecast.forecast[1].ending_balance, dec!(140));
}

#[test]
fn test_weekly_forecast_without_balances_starts_at_zero() {
    let service = ForecastService::new(
        Arc::new(FixedBalances(vec![])),
        Arc::new(FixedPayments(vec![])),
    );
    let forecast = service.weekly_forecast(date(2024, 6, 15)).unwrap();
    assert!(forecast.forecast.iter().all(|d| d.ending_balance == Decimal::ZERO));
}
