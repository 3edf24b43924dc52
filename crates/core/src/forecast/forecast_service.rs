use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::forecast_model::{ForecastDay, ForecastPayment, WeeklyForecast};
use crate::balances::BalanceRepositoryTrait;
use crate::constants::{DISPLAY_DECIMAL_PRECISION, FORECAST_DAYS};
use crate::errors::Result;
use crate::scheduled_payments::{ScheduledPayment, ScheduledPaymentRepositoryTrait};

/// Projects `days` days starting at `start`.
///
/// A payment is due on a day when its `day_of_month` equals the calendar day,
/// so days that do not exist in a month (e.g. the 31st in April) never match.
pub fn project_days(
    starting_balance: Decimal,
    payments: &[ScheduledPayment],
    start: NaiveDate,
    days: u32,
) -> Vec<ForecastDay> {
    let mut balance = starting_balance;
    let mut forecast = Vec::with_capacity(days as usize);

    for offset in 0..days {
        let date = start + Duration::days(i64::from(offset));
        let due: Vec<&ScheduledPayment> = payments
            .iter()
            .filter(|p| p.day_of_month == date.day() as i32)
            .collect();
        let total: Decimal = due.iter().map(|p| p.amount).sum();
        let ending = balance - total;

        forecast.push(ForecastDay {
            date,
            day_name: date.format("%A").to_string(),
            starting_balance: balance.round_dp(DISPLAY_DECIMAL_PRECISION),
            payments: due
                .iter()
                .map(|p| ForecastPayment {
                    name: p.name.clone(),
                    amount: p.amount,
                    category: p.category.clone(),
                })
                .collect(),
            total_payments: total.round_dp(DISPLAY_DECIMAL_PRECISION),
            ending_balance: ending.round_dp(DISPLAY_DECIMAL_PRECISION),
        });

        balance = ending;
    }

    forecast
}

pub trait ForecastServiceTrait: Send + Sync {
    fn weekly_forecast(&self, today: NaiveDate) -> Result<WeeklyForecast>;
}

pub struct ForecastService {
    balance_repository: Arc<dyn BalanceRepositoryTrait>,
    payment_repository: Arc<dyn ScheduledPaymentRepositoryTrait>,
}

impl ForecastService {
    pub fn new(
        balance_repository: Arc<dyn BalanceRepositoryTrait>,
        payment_repository: Arc<dyn ScheduledPaymentRepositoryTrait>,
    ) -> Self {
        Self {
            balance_repository,
            payment_repository,
        }
    }
}

impl ForecastServiceTrait for ForecastService {
    fn weekly_forecast(&self, today: NaiveDate) -> Result<WeeklyForecast> {
        let starting: Decimal = self
            .balance_repository
            .list_latest()?
            .values()
            .map(|b| b.available)
            .sum();
        let payments = self.payment_repository.list_active()?;

        Ok(WeeklyForecast {
            forecast: project_days(starting, &payments, today, FORECAST_DAYS),
            generated_at: Utc::now().naive_utc(),
        })
    }
}
