use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use tellerhome_connect::{
    RetryPolicy, SyncConfig, TellerClientConfig, DEFAULT_TELLER_API_URL,
};

const DEFAULT_LISTEN_PORT: u16 = 5001;
const DEFAULT_SYNC_INTERVAL_SECS: u64 = 12 * 60 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub static_dir: String,
    pub cors_allow_origins: Vec<String>,
    pub teller_api_url: String,
    /// Application-level token used by `POST /api/sync` and the health check.
    pub teller_app_token: Option<String>,
    pub teller_cert_path: PathBuf,
    pub teller_key_path: PathBuf,
    /// Base64 32-byte key for sealing stored access tokens.
    pub secret_key: Option<String>,
    /// Zero disables the background scheduler.
    pub sync_interval: Duration,
    pub sync_pacing: Duration,
    pub sync_max_attempts: u32,
    pub transaction_page_size: u32,
    pub balance_retention_days: Option<i64>,
    pub request_timeout: Duration,
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_var(key).unwrap_or_else(|| default.to_string())
}

fn parse_or_warn<T: std::str::FromStr>(key: &str, raw: Option<String>) -> Option<T> {
    let raw = raw?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring invalid {}={:?}, using default", key, raw);
            None
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    parse_or_warn(key, env_var(key)).unwrap_or(default)
}

/// Non-positive or unparseable values disable pruning.
fn retention_days(raw: Option<String>) -> Option<i64> {
    parse_or_warn::<i64>("TH_BALANCE_RETENTION_DAYS", raw).filter(|d| *d > 0)
}

impl Config {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let listen_addr = env_parse(
            "TH_LISTEN_ADDR",
            SocketAddr::from(([0, 0, 0, 0], DEFAULT_LISTEN_PORT)),
        );
        let cors_allow_origins = env_or("TH_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            listen_addr,
            db_path: env_or("TH_DB_PATH", "./db/app.db"),
            static_dir: env_or("TH_STATIC_DIR", "./static"),
            cors_allow_origins,
            teller_api_url: env_or("TELLER_API_URL", DEFAULT_TELLER_API_URL),
            teller_app_token: env_var("TELLER_APP_TOKEN"),
            teller_cert_path: PathBuf::from(env_or(
                "TELLER_CERT_PATH",
                "authentication/certificate.pem",
            )),
            teller_key_path: PathBuf::from(env_or(
                "TELLER_KEY_PATH",
                "authentication/private_key.pem",
            )),
            secret_key: env_var("TH_SECRET_KEY"),
            sync_interval: Duration::from_secs(env_parse(
                "TH_SYNC_INTERVAL_SECS",
                DEFAULT_SYNC_INTERVAL_SECS,
            )),
            sync_pacing: Duration::from_millis(env_parse("TH_SYNC_PACING_MS", 1000)),
            sync_max_attempts: env_parse("TH_SYNC_MAX_ATTEMPTS", 3u32).max(1),
            transaction_page_size: env_parse("TH_TRANSACTION_PAGE_SIZE", 500u32).max(1),
            balance_retention_days: retention_days(env_var("TH_BALANCE_RETENTION_DAYS")),
            request_timeout: Duration::from_secs(env_parse("TH_REQUEST_TIMEOUT_SECS", 30)),
        }
    }

    pub fn client_config(&self) -> TellerClientConfig {
        TellerClientConfig {
            base_url: self.teller_api_url.clone(),
            cert_path: Some(self.teller_cert_path.clone()),
            key_path: Some(self.teller_key_path.clone()),
            timeout: self.request_timeout,
            retry: RetryPolicy {
                max_attempts: self.sync_max_attempts,
                ..RetryPolicy::default()
            },
            pacing: self.sync_pacing,
        }
    }

    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig {
            transaction_page_size: self.transaction_page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_carries_retry_budget() {
        let config = Config {
            listen_addr: "127.0.0.1:5001".parse().unwrap(),
            db_path: "db/app.db".into(),
            static_dir: "static".into(),
            cors_allow_origins: vec!["*".into()],
            teller_api_url: "http://localhost:9".into(),
            teller_app_token: None,
            teller_cert_path: "cert.pem".into(),
            teller_key_path: "key.pem".into(),
            secret_key: None,
            sync_interval: Duration::ZERO,
            sync_pacing: Duration::from_millis(250),
            sync_max_attempts: 5,
            transaction_page_size: 50,
            balance_retention_days: None,
            request_timeout: Duration::from_secs(3),
        };

        let client = config.client_config();
        assert_eq!(client.retry.max_attempts, 5);
        assert_eq!(client.pacing, Duration::from_millis(250));
        assert_eq!(client.base_url, "http://localhost:9");
        assert_eq!(config.sync_config().transaction_page_size, 50);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        assert_eq!(parse_or_warn::<u32>("TH_SYNC_MAX_ATTEMPTS", Some("abc".into())), None);
        assert_eq!(parse_or_warn::<u32>("TH_SYNC_MAX_ATTEMPTS", Some("4".into())), Some(4));
        assert_eq!(parse_or_warn::<u32>("TH_SYNC_MAX_ATTEMPTS", None), None);
    }

    #[test]
    fn test_retention_days_requires_positive_number() {
        assert_eq!(retention_days(Some("30".into())), Some(30));
        assert_eq!(retention_days(Some("0".into())), None);
        assert_eq!(retention_days(Some("-3".into())), None);
        assert_eq!(retention_days(Some("thirty".into())), None);
        assert_eq!(retention_days(None), None);
    }
}
