use async_trait::async_trait;

use crate::models::{TellerAccount, TellerBalance, TellerTransaction};
use tellerhome_core::errors::Result;

/// Remote banking API, scoped to the credential the client was built with.
///
/// Implementations own retry and pacing. Callers only ever see a final
/// success or a `RemoteError`.
#[async_trait]
pub trait BankApiClient: Send + Sync {
    async fn list_accounts(&self) -> Result<Vec<TellerAccount>>;

    async fn get_balance(&self, account_id: &str) -> Result<TellerBalance>;

    async fn list_transactions(
        &self,
        account_id: &str,
        max_count: u32,
    ) -> Result<Vec<TellerTransaction>>;

    /// True when the credential can list accounts.
    async fn test_connection(&self) -> bool {
        self.list_accounts().await.is_ok()
    }
}

/// Builds a client bound to one access token.
pub trait BankApiClientFactory: Send + Sync {
    fn create(&self, access_token: &str) -> Result<Box<dyn BankApiClient>>;
}
