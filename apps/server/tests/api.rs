use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use tellerhome_connect::{BankApiClient, TellerAccount, TellerBalance, TellerTransaction};
use tellerhome_core::{errors::RemoteError, Result};
use tellerhome_server::{api::app_router, build_state, config::Config, AppState};

struct TestApp {
    _tmp: TempDir,
    state: Arc<AppState>,
    router: Router,
}

fn test_config(tmp: &TempDir) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: tmp.path().join("app.db").to_string_lossy().to_string(),
        static_dir: tmp.path().join("static").to_string_lossy().to_string(),
        cors_allow_origins: vec!["*".to_string()],
        // nothing listens here; enrollment syncs fail fast
        teller_api_url: "http://127.0.0.1:9".to_string(),
        teller_app_token: None,
        teller_cert_path: tmp.path().join("missing-cert.pem"),
        teller_key_path: tmp.path().join("missing-key.pem"),
        secret_key: None,
        sync_interval: Duration::ZERO,
        sync_pacing: Duration::ZERO,
        sync_max_attempts: 1,
        transaction_page_size: 500,
        balance_retention_days: None,
        request_timeout: Duration::from_secs(2),
    }
}

async fn test_app() -> TestApp {
    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(&tmp);
    let state = build_state(&config).await.unwrap();
    let router = app_router(state.clone(), &config);
    TestApp {
        _tmp: tmp,
        state,
        router,
    }
}

/// One checking account with a single transaction.
struct StubBank;

#[async_trait]
impl BankApiClient for StubBank {
    async fn list_accounts(&self) -> Result<Vec<TellerAccount>> {
        Ok(vec![TellerAccount {
            id: Some("a1".into()),
            name: Some("Checking".into()),
            account_type: Some("depository".into()),
            ..Default::default()
        }])
    }

    async fn get_balance(&self, _account_id: &str) -> Result<TellerBalance> {
        Ok(TellerBalance {
            account_id: Some("a1".into()),
            available: Some(json!("100.00")),
            ledger: Some(json!("120.00")),
        })
    }

    async fn list_transactions(
        &self,
        _account_id: &str,
        _max_count: u32,
    ) -> Result<Vec<TellerTransaction>> {
        Ok(vec![
            TellerTransaction {
                id: Some("t1".into()),
                amount: Some(json!("-5.00")),
                date: Some("2024-06-01".into()),
                description: Some("Coffee".into()),
                ..Default::default()
            },
            TellerTransaction {
                id: Some("t2".into()),
                amount: Some(json!("-12.50")),
                date: Some("2024-06-03".into()),
                description: Some("Lunch".into()),
                ..Default::default()
            },
        ])
    }
}

/// A savings account whose balance endpoint is down.
struct NoBalanceBank;

#[async_trait]
impl BankApiClient for NoBalanceBank {
    async fn list_accounts(&self) -> Result<Vec<TellerAccount>> {
        Ok(vec![TellerAccount {
            id: Some("a2".into()),
            name: Some("Savings".into()),
            account_type: Some("depository".into()),
            ..Default::default()
        }])
    }

    async fn get_balance(&self, _account_id: &str) -> Result<TellerBalance> {
        Err(RemoteError::Status {
            status: 502,
            message: "bad gateway".into(),
        }
        .into())
    }

    async fn list_transactions(
        &self,
        _account_id: &str,
        _max_count: u32,
    ) -> Result<Vec<TellerTransaction>> {
        Ok(Vec::new())
    }
}

async fn seed(app: &TestApp) {
    app.state.sync_service.sync_all(&StubBank).await.unwrap();
}

async fn send(app: &TestApp, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn info_and_health_respond() {
    let app = test_app().await;

    let (status, info) = send(&app, Method::GET, "/api/info", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(info["endpoints"]["POST /api/sync"].is_string());

    let (status, health) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["teller_api"], "not_configured");
}

#[tokio::test]
async fn accounts_include_latest_balance() {
    let app = test_app().await;
    let (_, empty) = send(&app, Method::GET, "/api/accounts", None).await;
    assert_eq!(empty, json!([]));

    seed(&app).await;

    let (status, accounts) = send(&app, Method::GET, "/api/accounts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(accounts.as_array().unwrap().len(), 1);
    assert_eq!(accounts[0]["id"], "a1");
    assert_eq!(accounts[0]["type"], "depository");
    assert_eq!(accounts[0]["balance"]["ledger"], 120.0);
    assert_eq!(accounts[0]["current_balance"], 120.0);

    let (status, one) = send(&app, Method::GET, "/api/accounts/a1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(one["balance"]["available"], 100.0);
    assert_eq!(one["current_balance"], 120.0);

    app.state.sync_service.sync_all(&NoBalanceBank).await.unwrap();
    let (status, bare) = send(&app, Method::GET, "/api/accounts/a2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(bare["balance"].is_null());
    assert_eq!(bare["current_balance"], 0.0);

    let (status, history) = send(&app, Method::GET, "/api/accounts/a1/balances", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_account_is_404() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/api/accounts/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("nope"));

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/accounts/nope/display-name",
        Some(json!({"display_name": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn display_name_is_set_and_cleared() {
    let app = test_app().await;
    seed(&app).await;

    let (status, account) = send(
        &app,
        Method::PUT,
        "/api/accounts/a1/display-name",
        Some(json!({"display_name": "  Bills  "})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(account["display_name"], "Bills");

    // a later sync must not touch the alias
    seed(&app).await;
    let (_, one) = send(&app, Method::GET, "/api/accounts/a1", None).await;
    assert_eq!(one["display_name"], "Bills");

    let (_, cleared) = send(
        &app,
        Method::PUT,
        "/api/accounts/a1/display-name",
        Some(json!({"display_name": ""})),
    )
    .await;
    assert!(cleared["display_name"].is_null());
}

#[tokio::test]
async fn transactions_are_newest_first_and_limited() {
    let app = test_app().await;
    seed(&app).await;

    let (status, all) = send(&app, Method::GET, "/api/accounts/a1/transactions", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["t2", "t1"]);

    let (_, limited) = send(
        &app,
        Method::GET,
        "/api/accounts/a1/transactions?limit=1",
        None,
    )
    .await;
    assert_eq!(limited.as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/accounts/a1/transactions?limit=-1",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn scheduled_payment_lifecycle() {
    let app = test_app().await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/scheduled-payments",
        Some(json!({"name": "Rent", "amount": "1200.00", "day_of_month": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["frequency"], "monthly");
    assert_eq!(created["is_recurring"], true);
    let id = created["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/scheduled-payments",
        Some(json!({"name": "Bad", "amount": 5, "day_of_month": 32})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/scheduled-payments",
        Some(json!({"amount": 5, "day_of_month": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, listed) = send(&app, Method::GET, "/api/scheduled-payments", None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let uri = format!("/api/scheduled-payments/{}", id);
    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, listed) = send(&app, Method::GET, "/api/scheduled-payments", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn weekly_forecast_covers_seven_days() {
    let app = test_app().await;
    seed(&app).await;

    let (status, body) = send(&app, Method::GET, "/api/weekly-forecast", None).await;

    assert_eq!(status, StatusCode::OK);
    let days = body["forecast"].as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["starting_balance"], 100.0);
    assert_eq!(days[6]["ending_balance"], 100.0);
}

#[tokio::test]
async fn enrollment_lifecycle() {
    let app = test_app().await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/teller-connect/enroll",
        Some(json!({"enrollment_id": "enr_1"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // the API is unreachable, so the enrollment is saved but not synced
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/teller-connect/enroll",
        Some(json!({
            "access_token": "tok_1",
            "enrollment_id": "enr_1",
            "institution_name": "Chase"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::MULTI_STATUS);
    assert_eq!(body["status"], "partial");
    assert!(body["enrollment"].get("access_token").is_none());

    let (_, status_body) = send(&app, Method::GET, "/api/teller-connect/status", None).await;
    assert_eq!(status_body["connected"], true);
    assert_eq!(status_body["enrollments"][0]["institution_name"], "Chase");

    let (_, other_user) = send(
        &app,
        Method::GET,
        "/api/teller-connect/status?user_id=someone_else",
        None,
    )
    .await;
    assert_eq!(other_user["connected"], false);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/teller-connect/disconnect/enr_1",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, after) = send(&app, Method::GET, "/api/teller-connect/status", None).await;
    assert_eq!(after["enrollments"], json!([]));

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/teller-connect/disconnect/missing",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn sync_without_credentials_reports_nothing_to_do() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::POST, "/api/sync", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "enrollments");
    assert_eq!(body["result"]["enrollments"], 0);
}
