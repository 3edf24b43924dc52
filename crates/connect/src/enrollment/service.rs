use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};
use log::{debug, error, info, warn};

use tellerhome_core::enrollments::{EnrollmentRepositoryTrait, EnrollmentRequest, UserEnrollment};
use tellerhome_core::errors::Result;
use tellerhome_core::secrets::CredentialSealer;

use super::models::{BatchSyncSummary, EnrollOutcome};
use crate::sync::{SyncResult, SyncService};
use crate::traits::BankApiClientFactory;

pub struct EnrollmentService {
    repository: Arc<dyn EnrollmentRepositoryTrait>,
    sealer: Arc<dyn CredentialSealer>,
    client_factory: Arc<dyn BankApiClientFactory>,
    sync_service: Arc<SyncService>,
}

impl EnrollmentService {
    pub fn new(
        repository: Arc<dyn EnrollmentRepositoryTrait>,
        sealer: Arc<dyn CredentialSealer>,
        client_factory: Arc<dyn BankApiClientFactory>,
        sync_service: Arc<SyncService>,
    ) -> Self {
        Self {
            repository,
            sealer,
            client_factory,
            sync_service,
        }
    }

    /// Stores (or refreshes) a credential and syncs it straight away.
    ///
    /// Only validation and store failures are errors. A failed first sync is
    /// reported as [`EnrollOutcome::SyncFailed`] with the enrollment kept.
    pub async fn enroll(&self, request: EnrollmentRequest) -> Result<EnrollOutcome> {
        let mut new_enrollment = request.validate()?;
        let access_token = new_enrollment.access_token.clone();
        new_enrollment.access_token = self.sealer.seal(&access_token)?;

        let enrollment = self.repository.upsert(new_enrollment).await?;
        info!(
            "Enrollment {} saved for user {}",
            enrollment.enrollment_id, enrollment.user_id
        );

        match self.run_sync(&access_token).await {
            Ok(result) => {
                let mut enrollment = enrollment;
                enrollment.last_synced = self
                    .record_last_synced(&enrollment.enrollment_id)
                    .await
                    .or(enrollment.last_synced);
                Ok(EnrollOutcome::Synced { enrollment, result })
            }
            Err(e) => {
                warn!(
                    "Initial sync for enrollment {} failed: {}",
                    enrollment.enrollment_id, e
                );
                Ok(EnrollOutcome::SyncFailed {
                    enrollment,
                    message: e.to_string(),
                })
            }
        }
    }

    pub fn status(&self, user_id: &str) -> Result<Vec<UserEnrollment>> {
        self.repository.list_active_for_user(user_id)
    }

    pub async fn disconnect(&self, enrollment_id: &str) -> Result<UserEnrollment> {
        let enrollment = self.repository.deactivate(enrollment_id).await?;
        info!("Enrollment {} disconnected", enrollment_id);
        Ok(enrollment)
    }

    /// Syncs one stored enrollment and records `last_synced` on success.
    ///
    /// The result stands even if `last_synced` cannot be written, since the
    /// synced data is already committed.
    pub async fn sync_enrollment(&self, enrollment: &UserEnrollment) -> Result<SyncResult> {
        let access_token = self.sealer.open(&enrollment.access_token)?;
        let result = self.run_sync(&access_token).await?;
        self.record_last_synced(&enrollment.enrollment_id).await;
        Ok(result)
    }

    /// Syncs every active enrollment in turn. A failing credential is
    /// recorded and the pass moves on to the next one.
    pub async fn sync_all_active(&self) -> Result<BatchSyncSummary> {
        let enrollments = self.repository.list_active()?;
        let mut summary = BatchSyncSummary {
            enrollments: enrollments.len(),
            ..Default::default()
        };
        info!("Syncing {} active enrollments", enrollments.len());

        for enrollment in &enrollments {
            debug!("Syncing enrollment {}", enrollment.enrollment_id);
            match self.sync_enrollment(enrollment).await {
                Ok(result) => summary.record_success(&result),
                Err(e) => {
                    error!(
                        "Sync failed for enrollment {}: {}",
                        enrollment.enrollment_id, e
                    );
                    summary.record_failure(&enrollment.enrollment_id, e.to_string());
                }
            }
        }

        info!(
            "Batch sync finished: {}/{} enrollments succeeded, {} new transactions",
            summary.successful, summary.enrollments, summary.transactions
        );
        Ok(summary)
    }

    async fn run_sync(&self, access_token: &str) -> Result<SyncResult> {
        let client = self.client_factory.create(access_token)?;
        self.sync_service.sync_all(client.as_ref()).await
    }

    async fn record_last_synced(&self, enrollment_id: &str) -> Option<NaiveDateTime> {
        let now = Utc::now().naive_utc();
        match self.repository.mark_synced(enrollment_id, now).await {
            Ok(()) => Some(now),
            Err(e) => {
                error!(
                    "Enrollment {} synced but last_synced was not recorded: {}",
                    enrollment_id, e
                );
                None
            }
        }
    }
}
