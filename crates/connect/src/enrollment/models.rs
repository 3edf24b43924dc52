use serde::{Deserialize, Serialize};

use tellerhome_core::enrollments::UserEnrollment;

use crate::sync::SyncResult;

/// Result of linking a credential. The enrollment is persisted either way.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EnrollOutcome {
    Synced {
        enrollment: UserEnrollment,
        result: SyncResult,
    },
    SyncFailed {
        enrollment: UserEnrollment,
        message: String,
    },
}

impl EnrollOutcome {
    pub fn is_synced(&self) -> bool {
        matches!(self, EnrollOutcome::Synced { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentFailure {
    pub enrollment_id: String,
    pub message: String,
}

/// Totals across one pass over every active enrollment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSyncSummary {
    pub enrollments: usize,
    pub successful: usize,
    pub failed: usize,
    pub accounts: usize,
    pub balances: usize,
    pub transactions: usize,
    pub failures: Vec<EnrollmentFailure>,
}

impl BatchSyncSummary {
    pub(crate) fn record_success(&mut self, result: &SyncResult) {
        self.successful += 1;
        self.accounts += result.accounts;
        self.balances += result.balances;
        self.transactions += result.transactions;
    }

    pub(crate) fn record_failure(&mut self, enrollment_id: &str, message: String) {
        self.failed += 1;
        self.failures.push(EnrollmentFailure {
            enrollment_id: enrollment_id.to_string(),
            message,
        });
    }

    /// True when at least one enrollment synced, or there was nothing to sync.
    pub fn any_succeeded(&self) -> bool {
        self.enrollments == 0 || self.successful > 0
    }
}
