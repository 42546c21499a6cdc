//! Shared helpers for API integration tests.
//!
//! Not every test target uses every helper.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use leadflow_api::config::ServerConfig;
use leadflow_api::router::build_app_router;
use leadflow_api::state::AppState;
use leadflow_platform::{FetchError, LeadSource, RawLead, RechargeProvider};
use leadflow_settlement::SettlementEngine;

/// Verify token used by all test configs.
pub const TEST_VERIFY_TOKEN: &str = "test-verify-token";

/// Build a test `ServerConfig` with safe defaults and no app secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        webhook_verify_token: TEST_VERIFY_TOKEN.to_string(),
        webhook_app_secret: None,
        platform_api_base_url: "http://platform.invalid".to_string(),
        platform_fetch_timeout_secs: 5,
    }
}

/// In-process lead source serving canned payloads; unknown ids get a 404.
pub struct FakeLeadSource {
    leads: HashMap<String, serde_json::Value>,
}

impl FakeLeadSource {
    pub fn new() -> Self {
        Self {
            leads: HashMap::new(),
        }
    }

    pub fn with_lead(mut self, leadgen_id: &str, payload: serde_json::Value) -> Self {
        self.leads.insert(leadgen_id.to_string(), payload);
        self
    }
}

#[async_trait::async_trait]
impl LeadSource for FakeLeadSource {
    async fn fetch_lead(
        &self,
        leadgen_id: &str,
        _access_token: &str,
    ) -> Result<RawLead, FetchError> {
        match self.leads.get(leadgen_id) {
            Some(payload) => serde_json::from_value(payload.clone())
                .map_err(|e| FetchError::Malformed(e.to_string())),
            None => Err(FetchError::HttpStatus(404)),
        }
    }
}

/// Recharge provider that always declines.
pub struct NoRecharge;

#[async_trait::async_trait]
impl RechargeProvider for NoRecharge {
    async fn attempt_recharge(
        &self,
        _tenant_id: i64,
        _amount_cents: i64,
    ) -> Result<bool, leadflow_platform::RechargeError> {
        Ok(false)
    }
}

/// Build the application with an explicit config and lead source.
///
/// Mirrors `main.rs` wiring so tests exercise the same middleware stack
/// production uses.
pub fn build_test_app_with(
    pool: PgPool,
    config: ServerConfig,
    source: FakeLeadSource,
) -> Router {
    let engine = Arc::new(SettlementEngine::new(
        pool.clone(),
        Arc::new(source),
        Arc::new(NoRecharge),
    ));
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        engine,
    };
    build_app_router(state, &config)
}

/// Build the application with the default test config and lead source.
pub fn build_test_app(pool: PgPool, source: FakeLeadSource) -> Router {
    build_test_app_with(pool, test_config(), source)
}

/// Issue a GET request.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Issue a POST with a JSON body and optional extra headers.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &str,
    headers: &[(&str, &str)],
) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    app.oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as a string.
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Insert a tenant row and return its id.
pub async fn seed_tenant(pool: &PgPool) -> i64 {
    sqlx::query_scalar("INSERT INTO tenants (name) VALUES ('acme') RETURNING id")
        .fetch_one(pool)
        .await
        .expect("insert tenant")
}

/// Insert an active import config for (tenant, 'form-1', 'facebook').
pub async fn seed_config(pool: &PgPool, tenant_id: i64, cost_cents: i64) {
    let mapping = serde_json::json!({
        "email": "email",
        "first_name": "first_name",
        "last_name": "last_name",
    });
    sqlx::query(
        "INSERT INTO import_configs \
           (tenant_id, campaign_id, platform, access_token, field_mapping, \
            cost_per_lead_cents) \
         VALUES ($1, 'form-1', 'facebook', 'token-1', $2, $3)",
    )
    .bind(tenant_id)
    .bind(&mapping)
    .bind(cost_cents)
    .execute(pool)
    .await
    .expect("insert config");
}

/// Add funds to a tenant's balance.
pub async fn seed_balance(pool: &PgPool, tenant_id: i64, cents: i64) {
    leadflow_db::repositories::BalanceRepo::credit(pool, tenant_id, cents, None, "Top-up")
        .await
        .expect("credit balance");
}
