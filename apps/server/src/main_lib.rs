use std::sync::Arc;

use chrono::Duration as ChronoDuration;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use tellerhome_connect::{BankApiClient, EnrollmentService, SyncService, TellerClientFactory};
use tellerhome_core::{
    accounts::{AccountService, AccountServiceTrait},
    balances::BalanceRepositoryTrait,
    forecast::{ForecastService, ForecastServiceTrait},
    scheduled_payments::{ScheduledPaymentService, ScheduledPaymentServiceTrait},
    transactions::{TransactionService, TransactionServiceTrait},
};
use tellerhome_storage_sqlite::{
    db, AccountRepository, BalanceRepository, EnrollmentRepository, ScheduledPaymentRepository,
    TransactionRepository,
};

use crate::{config::Config, secrets::build_sealer};

pub struct AppState {
    pub account_service: Arc<dyn AccountServiceTrait>,
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub scheduled_payment_service: Arc<dyn ScheduledPaymentServiceTrait>,
    pub forecast_service: Arc<dyn ForecastServiceTrait>,
    pub balance_repository: Arc<dyn BalanceRepositoryTrait>,
    pub sync_service: Arc<SyncService>,
    pub enrollment_service: Arc<EnrollmentService>,
    pub client_factory: Arc<TellerClientFactory>,
    pub app_token: Option<String>,
    pub balance_retention: Option<ChronoDuration>,
    pub db_path: String,
}

impl AppState {
    /// Client bound to `TELLER_APP_TOKEN`, when one is configured.
    pub fn app_client(&self) -> Option<Box<dyn BankApiClient>> {
        self.app_token
            .as_deref()
            .map(|token| Box::new(self.client_factory.client(token)) as Box<dyn BankApiClient>)
    }
}

pub fn init_tracing() {
    let log_format = std::env::var("TH_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // `try_init` also installs the bridge for `log` records from the library crates
    let result = if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .try_init()
    };
    if let Err(e) = result {
        eprintln!("Tracing already initialized: {}", e);
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let account_repository = Arc::new(AccountRepository::new(pool.clone(), writer.clone()));
    let balance_repository = Arc::new(BalanceRepository::new(pool.clone(), writer.clone()));
    let transaction_repository =
        Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
    let payment_repository =
        Arc::new(ScheduledPaymentRepository::new(pool.clone(), writer.clone()));
    let enrollment_repository = Arc::new(EnrollmentRepository::new(pool.clone(), writer));

    let account_service = Arc::new(AccountService::new(
        account_repository.clone(),
        balance_repository.clone(),
    ));
    let transaction_service = Arc::new(TransactionService::new(transaction_repository.clone()));
    let scheduled_payment_service =
        Arc::new(ScheduledPaymentService::new(payment_repository.clone()));
    let forecast_service = Arc::new(ForecastService::new(
        balance_repository.clone(),
        payment_repository,
    ));

    let client_factory = Arc::new(TellerClientFactory::new(config.client_config())?);
    let sync_service = Arc::new(
        SyncService::new(
            account_repository,
            balance_repository.clone(),
            transaction_repository,
        )
        .with_config(config.sync_config()),
    );
    let sealer = build_sealer(config.secret_key.as_deref())?;
    let enrollment_service = Arc::new(EnrollmentService::new(
        enrollment_repository,
        sealer,
        client_factory.clone(),
        sync_service.clone(),
    ));

    Ok(Arc::new(AppState {
        account_service,
        transaction_service,
        scheduled_payment_service,
        forecast_service,
        balance_repository,
        sync_service,
        enrollment_service,
        client_factory,
        app_token: config.teller_app_token.clone(),
        balance_retention: config.balance_retention_days.map(ChronoDuration::days),
        db_path,
    }))
}
