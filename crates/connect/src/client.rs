//! HTTP client for the Teller API.
//!
//! Each request waits on the shared [`RequestPacer`], authenticates with the
//! enrollment's access token (HTTP Basic, empty password) and is retried on
//! HTTP 429 according to the [`RetryPolicy`].

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tellerhome_core::errors::{Error, RemoteError, Result};

use crate::models::{TellerAccount, TellerBalance, TellerTransaction};
use crate::pacer::RequestPacer;
use crate::retry::{parse_retry_after, RetryPolicy};
use crate::traits::{BankApiClient, BankApiClientFactory};

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default base URL of the Teller API.
pub const DEFAULT_TELLER_API_URL: &str = "https://api.teller.io";

const DEFAULT_CERT_PATH: &str = "authentication/certificate.pem";
const DEFAULT_KEY_PATH: &str = "authentication/private_key.pem";

const CLIENT_USER_AGENT: &str = concat!("TellerHome/", env!("CARGO_PKG_VERSION"));

/// Everything needed to talk to the Teller API except the access token.
#[derive(Debug, Clone)]
pub struct TellerClientConfig {
    pub base_url: String,
    /// PEM client certificate for mTLS. Used only together with `key_path`.
    pub cert_path: Option<PathBuf>,
    pub key_path: Option<PathBuf>,
    pub timeout: Duration,
    pub retry: RetryPolicy,
    /// Minimum spacing between requests.
    pub pacing: Duration,
}

impl Default for TellerClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TELLER_API_URL.to_string(),
            cert_path: Some(PathBuf::from(DEFAULT_CERT_PATH)),
            key_path: Some(PathBuf::from(DEFAULT_KEY_PATH)),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry: RetryPolicy::default(),
            pacing: Duration::from_secs(1),
        }
    }
}

/// Loads the mTLS identity when both PEM files exist.
fn load_identity(config: &TellerClientConfig) -> Result<Option<reqwest::Identity>> {
    let (Some(cert_path), Some(key_path)) = (&config.cert_path, &config.key_path) else {
        return Ok(None);
    };
    if !cert_path.exists() || !key_path.exists() {
        warn!(
            "Teller client certificate not found at {} / {}; continuing without mTLS",
            cert_path.display(),
            key_path.display()
        );
        return Ok(None);
    }

    let mut pem = std::fs::read(cert_path)?;
    pem.push(b'\n');
    pem.extend(std::fs::read(key_path)?);
    let identity = reqwest::Identity::from_pem(&pem).map_err(|e| {
        Error::InvalidConfigValue(format!("Invalid Teller certificate or key: {}", e))
    })?;
    info!("Loaded Teller client certificate from {}", cert_path.display());
    Ok(Some(identity))
}

fn build_http_client(config: &TellerClientConfig) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

    let mut builder = reqwest::Client::builder()
        .timeout(config.timeout)
        .default_headers(headers);
    if let Some(identity) = load_identity(config)? {
        builder = builder.identity(identity);
    }

    builder
        .build()
        .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))
}

/// Client for the Teller API bound to one access token.
#[derive(Clone)]
pub struct TellerApiClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
    retry: RetryPolicy,
    pacer: Arc<RequestPacer>,
}

impl std::fmt::Debug for TellerApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TellerApiClient")
            .field("base_url", &self.base_url)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl TellerApiClient {
    /// Builds a standalone client with its own pacer.
    pub fn new(config: &TellerClientConfig, access_token: &str) -> Result<Self> {
        let http = build_http_client(config)?;
        Ok(Self::from_parts(
            http,
            config,
            access_token,
            Arc::new(RequestPacer::new(config.pacing)),
        ))
    }

    fn from_parts(
        http: reqwest::Client,
        config: &TellerClientConfig,
        access_token: &str,
        pacer: Arc<RequestPacer>,
    ) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
            retry: config.retry.clone(),
            pacer,
        }
    }

    /// GET `path`, retrying on 429 until the attempt budget is spent.
    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut attempt = 0;

        loop {
            attempt += 1;
            self.pacer.wait().await;
            debug!("[TellerApi] GET {} (attempt {})", url, attempt);

            let response = self
                .http
                .get(&url)
                .basic_auth(&self.access_token, Some(""))
                .query(query)
                .send()
                .await
                .map_err(|e| RemoteError::Transport(e.to_string()))?;

            if response.status() != StatusCode::TOO_MANY_REQUESTS {
                return Self::parse_response(response).await;
            }

            if attempt >= self.retry.max_attempts {
                warn!("[TellerApi] {} still rate limited after {} attempts", url, attempt);
                return Err(RemoteError::RateLimited { attempts: attempt }.into());
            }

            let delay = self
                .retry
                .delay_for(attempt, parse_retry_after(response.headers()));
            warn!(
                "[TellerApi] Rate limited on {}; retrying in {:?} (attempt {}/{})",
                url, delay, attempt, self.retry.max_attempts
            );
            tokio::time::sleep(delay).await;
        }
    }

    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RemoteError::Transport(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| {
                    v.pointer("/error/message")
                        .or_else(|| v.get("message"))
                        .and_then(|m| m.as_str())
                        .map(String::from)
                })
                .unwrap_or_else(|| body.chars().take(200).collect());
            return Err(RemoteError::Status {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        serde_json::from_str(&body).map_err(|e| RemoteError::Decode(e.to_string()).into())
    }
}

#[async_trait]
impl BankApiClient for TellerApiClient {
    async fn list_accounts(&self) -> Result<Vec<TellerAccount>> {
        self.get("/accounts", &[]).await
    }

    async fn get_balance(&self, account_id: &str) -> Result<TellerBalance> {
        let path = format!("/accounts/{}/balances", urlencoding::encode(account_id));
        self.get(&path, &[]).await
    }

    async fn list_transactions(
        &self,
        account_id: &str,
        max_count: u32,
    ) -> Result<Vec<TellerTransaction>> {
        let path = format!("/accounts/{}/transactions", urlencoding::encode(account_id));
        self.get(&path, &[("count", max_count.to_string())]).await
    }
}

/// Creates clients that share one HTTP connection pool and one pacer, so
/// pacing holds across every credential the process syncs.
pub struct TellerClientFactory {
    config: TellerClientConfig,
    http: reqwest::Client,
    pacer: Arc<RequestPacer>,
}

impl TellerClientFactory {
    pub fn new(config: TellerClientConfig) -> Result<Self> {
        let http = build_http_client(&config)?;
        let pacer = Arc::new(RequestPacer::new(config.pacing));
        Ok(Self {
            config,
            http,
            pacer,
        })
    }

    pub fn client(&self, access_token: &str) -> TellerApiClient {
        TellerApiClient::from_parts(
            self.http.clone(),
            &self.config,
            access_token,
            Arc::clone(&self.pacer),
        )
    }
}

impl BankApiClientFactory for TellerClientFactory {
    fn create(&self, access_token: &str) -> Result<Box<dyn BankApiClient>> {
        Ok(Box::new(self.client(access_token)))
    }
}
