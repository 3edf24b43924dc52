//! Background scheduler for periodic account sync.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::api::sync::perform_sync;
use crate::main_lib::AppState;

/// Initial delay before first sync (let the server finish starting)
const INITIAL_DELAY_SECS: u64 = 60;

/// Starts the background sync loop. A zero `period` disables it.
pub fn start_sync_scheduler(state: Arc<AppState>, period: Duration) {
    if period.is_zero() {
        info!("Sync scheduler disabled");
        return;
    }

    tokio::spawn(async move {
        info!("Sync scheduler started ({}s interval)", period.as_secs());

        tokio::time::sleep(Duration::from_secs(INITIAL_DELAY_SECS)).await;

        // first tick is immediate
        let mut sync_interval = interval(period);
        loop {
            sync_interval.tick().await;
            run_scheduled_sync(&state).await;
        }
    });
}

async fn run_scheduled_sync(state: &AppState) {
    info!("Running scheduled sync...");
    match perform_sync(state).await {
        Ok(body) => info!("Scheduled sync completed: {}", body["message"]),
        Err(e) => warn!("Scheduled sync failed: {}", e),
    }

    if let Err(e) = prune_balances(state).await {
        warn!("Balance pruning failed: {}", e);
    }
}

/// Drops balance snapshots older than the retention window. The newest row
/// of every account is always kept.
pub async fn prune_balances(state: &AppState) -> tellerhome_core::Result<usize> {
    let Some(retention) = state.balance_retention else {
        debug!("Balance retention not configured; keeping full history");
        return Ok(0);
    };
    let cutoff = Utc::now().naive_utc() - retention;
    let removed = state.balance_repository.prune_before(cutoff).await?;
    if removed > 0 {
        info!("Pruned {} balance snapshots older than {}", removed, cutoff);
    }
    Ok(removed)
}
