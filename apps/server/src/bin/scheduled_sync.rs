//! One-shot sync of every active enrollment, for cron-style scheduling.
//!
//! Exits non-zero only when there were enrollments and none of them synced.

use std::process::ExitCode;

use tellerhome_server::{build_state, config::Config, init_tracing, scheduler};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // tracing first so config parsing can warn about bad values
    let _ = dotenvy::dotenv();
    init_tracing();
    let config = Config::from_env();
    let state = build_state(&config).await?;

    tracing::info!("Starting scheduled sync");
    let summary = state.enrollment_service.sync_all_active().await?;
    for failure in &summary.failures {
        tracing::error!(
            "Enrollment {} failed: {}",
            failure.enrollment_id,
            failure.message
        );
    }
    tracing::info!(
        "Scheduled sync finished: {}/{} enrollments, {} accounts, {} balances, {} new transactions",
        summary.successful,
        summary.enrollments,
        summary.accounts,
        summary.balances,
        summary.transactions
    );

    scheduler::prune_balances(&state).await?;

    if summary.any_succeeded() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
