//! Platform lead fetch: trait, raw payload shape, and the Graph API client.
//!
//! A fetch failure of any kind (transport, non-2xx, malformed payload) is a
//! recoverable per-lead signal: the orchestrator records it and moves on to
//! the next lead in the batch. No retries happen at this layer; the
//! platform's own webhook redelivery is the retry path.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{Map, Value};

/// Error type for platform lead fetches.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The platform returned a non-2xx status code.
    #[error("Platform returned HTTP {0}")]
    HttpStatus(u16),

    /// The response body did not match the expected payload shape.
    #[error("Malformed platform payload: {0}")]
    Malformed(String),
}

/// One named answer from the platform, possibly multi-valued.
#[derive(Debug, Clone, Deserialize)]
pub struct RawField {
    pub name: String,
    #[serde(default)]
    pub values: Vec<Value>,
}

/// The raw lead payload as returned by the platform.
///
/// Ephemeral: exists only for the duration of one settlement attempt and is
/// never persisted verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLead {
    pub id: String,
    #[serde(default)]
    pub field_data: Vec<RawField>,
    /// Remaining top-level keys (created_time, ad_id, ...), kept so mapping
    /// paths can reach beyond `field_data`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawLead {
    /// Flatten the payload into a single JSON object for path resolution.
    ///
    /// Each `field_data` answer contributes its **first** value under its
    /// name (only the first answer is authoritative by platform convention);
    /// remaining top-level keys are carried through unchanged. Answers with
    /// an empty value list are omitted.
    pub fn flatten(&self) -> Value {
        let mut flat = self.extra.clone();
        flat.insert("id".to_string(), Value::String(self.id.clone()));
        for field in &self.field_data {
            if let Some(first) = field.values.first() {
                flat.insert(field.name.clone(), first.clone());
            }
        }
        Value::Object(flat)
    }
}

/// A source of full lead payloads, keyed by the platform's opaque lead id.
#[async_trait::async_trait]
pub trait LeadSource: Send + Sync {
    /// Fetch one lead using the tenant's access token.
    async fn fetch_lead(&self, leadgen_id: &str, access_token: &str)
        -> Result<RawLead, FetchError>;
}

/// Graph-API-style lead client: `GET {base}/{leadgen_id}?access_token=...`.
pub struct GraphLeadClient {
    client: reqwest::Client,
    base_url: String,
}

impl GraphLeadClient {
    /// Build a client against a base URL with a bounded request timeout.
    ///
    /// The timeout bounds how long one lead fetch can stall a batch; on
    /// expiry the request surfaces as [`FetchError::Request`].
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait::async_trait]
impl LeadSource for GraphLeadClient {
    async fn fetch_lead(
        &self,
        leadgen_id: &str,
        access_token: &str,
    ) -> Result<RawLead, FetchError> {
        let url = format!("{}/{leadgen_id}", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("access_token", access_token)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(leadgen_id, status = status.as_u16(), "Lead fetch failed");
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body: Value = response.json().await?;
        serde_json::from_value(body).map_err(|e| FetchError::Malformed(e.to_string()))
    }
}
