//! Teller Home Connect - remote bank data and the synchronization engine.
//!
//! This crate talks to the Teller API and reconciles what it returns with
//! the local store through the repository traits of `tellerhome-core`:
//! - [`client`]: the reqwest-based API client with retry and pacing
//! - [`sync`]: the three-stage account/balance/transaction sync engine
//! - [`enrollment`]: credential management and batch sync over enrollments

pub mod client;
pub mod enrollment;
pub mod models;
pub mod pacer;
pub mod retry;
pub mod sync;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use client::{TellerApiClient, TellerClientConfig, TellerClientFactory, DEFAULT_TELLER_API_URL};
pub use enrollment::{BatchSyncSummary, EnrollOutcome, EnrollmentFailure, EnrollmentService};
pub use models::{TellerAccount, TellerBalance, TellerInstitution, TellerTransaction};
pub use pacer::RequestPacer;
pub use retry::RetryPolicy;
pub use sync::{SkippedAccount, SyncConfig, SyncResult, SyncService, SyncStage};
pub use traits::{BankApiClient, BankApiClientFactory};
