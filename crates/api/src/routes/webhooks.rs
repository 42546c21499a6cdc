//! Webhook ingress: verification handshake and lead delivery batches.
//!
//! Delivery processing is deliberately forgiving: once the envelope parses,
//! the endpoint always answers 200 with per-lead results. Failing the batch
//! for one bad lead would make the platform storm-replay leads that already
//! settled.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use leadflow_core::types::DbId;
use leadflow_settlement::{LeadEvent, SettlementOutcome};

use crate::error::{AppError, AppResult};
use crate::signature;
use crate::state::AppState;

/// The only change kind the pipeline processes.
const LEADGEN_FIELD: &str = "leadgen";

/// Source platform recorded on leads originating from this ingress.
const PLATFORM: &str = "facebook";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Verification handshake query parameters.
#[derive(Debug, Deserialize)]
struct VerifyParams {
    #[serde(rename = "hub.mode")]
    mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    challenge: Option<String>,
}

/// Delivery envelope: one or more entries, each with zero or more changes.
///
/// A body missing the `entry` array fails deserialization and is the only
/// batch-level failure (400).
#[derive(Debug, Deserialize)]
struct Envelope {
    entry: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(default)]
    changes: Vec<Change>,
}

#[derive(Debug, Deserialize)]
struct Change {
    field: String,
    #[serde(default)]
    value: Option<ChangeValue>,
}

/// The `value` object of a `leadgen` change. The platform serializes ids
/// inconsistently (strings or numbers), so both are accepted.
#[derive(Debug, Deserialize)]
struct ChangeValue {
    form_id: Option<Value>,
    leadgen_id: Option<Value>,
    #[allow(dead_code)]
    page_id: Option<Value>,
}

/// Per-lead result embedded in the batch response.
#[derive(Debug, Serialize)]
struct LeadResult {
    leadgen_id: String,
    success: bool,
    // Historical wire contract: this one field is camelCase.
    #[serde(rename = "leadId", skip_serializing_if = "Option::is_none")]
    lead_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Batch response: `success` reflects envelope validity, not lead outcomes.
#[derive(Debug, Serialize)]
struct WebhookResponse {
    success: bool,
    results: Vec<LeadResult>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /webhooks/leadgen/{tenant_id}
///
/// Verification handshake: echo the challenge iff the presented token
/// matches the configured secret.
async fn verify_webhook(
    State(state): State<AppState>,
    Path(tenant_id): Path<DbId>,
    Query(params): Query<VerifyParams>,
) -> AppResult<String> {
    let mode_ok = params.mode.as_deref() == Some("subscribe");
    let token_ok = params.verify_token.as_deref() == Some(&state.config.webhook_verify_token);

    if mode_ok && token_ok {
        let challenge = params
            .challenge
            .ok_or_else(|| AppError::BadRequest("Missing hub.challenge".into()))?;
        tracing::info!(tenant_id, "Webhook verification handshake accepted");
        return Ok(challenge);
    }

    tracing::warn!(tenant_id, "Webhook verification handshake rejected");
    Err(AppError::Forbidden("Verify token mismatch".into()))
}

/// POST /webhooks/leadgen/{tenant_id}
///
/// Delivery: extract every `leadgen` change across all entries, settle each
/// independently, and report per-lead results. The tenant comes from the
/// trailing path segment.
async fn receive_webhook(
    State(state): State<AppState>,
    Path(tenant_id): Path<DbId>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<WebhookResponse>> {
    if let Some(secret) = state.config.webhook_app_secret.as_deref() {
        let presented = headers
            .get(signature::SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing payload signature".into()))?;
        if !signature::verify(secret, &body, presented) {
            return Err(AppError::Unauthorized("Invalid payload signature".into()));
        }
    }

    let envelope: Envelope = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Malformed webhook envelope: {e}")))?;

    let mut results = Vec::new();
    for entry in &envelope.entry {
        for change in &entry.changes {
            if change.field != LEADGEN_FIELD {
                continue;
            }
            results.push(process_change(&state, tenant_id, change.value.as_ref()).await);
        }
    }

    tracing::info!(
        tenant_id,
        total = results.len(),
        failed = results.iter().filter(|r| !r.success).count(),
        "Webhook batch processed"
    );

    Ok(Json(WebhookResponse {
        success: true,
        results,
    }))
}

/// Settle a single `leadgen` change, converting every failure into a
/// structured per-lead result. One failing lead never aborts its siblings.
async fn process_change(
    state: &AppState,
    tenant_id: DbId,
    value: Option<&ChangeValue>,
) -> LeadResult {
    let (form_id, leadgen_id) = match value.map(|v| (id_string(&v.form_id), id_string(&v.leadgen_id)))
    {
        Some((Some(form_id), Some(leadgen_id))) => (form_id, leadgen_id),
        _ => {
            return LeadResult {
                leadgen_id: "unknown".to_string(),
                success: false,
                lead_id: None,
                error: Some("Malformed leadgen change".to_string()),
            };
        }
    };

    let event = LeadEvent {
        tenant_id,
        campaign_id: form_id,
        source_lead_id: leadgen_id.clone(),
        platform: PLATFORM.to_string(),
    };

    match state.engine.settle(&event).await {
        Ok(SettlementOutcome::Settled { lead_id }) => LeadResult {
            leadgen_id,
            success: true,
            lead_id: Some(lead_id),
            error: None,
        },
        Ok(SettlementOutcome::Duplicate { lead_id }) => LeadResult {
            leadgen_id,
            success: true,
            lead_id,
            error: None,
        },
        Ok(SettlementOutcome::Rejected { reason, lead_id }) => LeadResult {
            leadgen_id,
            success: false,
            lead_id,
            error: Some(reason.to_string()),
        },
        Err(e) => {
            tracing::error!(tenant_id, leadgen_id = %leadgen_id, error = %e, "Lead settlement errored");
            LeadResult {
                leadgen_id,
                success: false,
                lead_id: None,
                error: Some("Internal error".to_string()),
            }
        }
    }
}

/// Normalize a platform id that may arrive as a JSON string or number.
fn id_string(value: &Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/webhooks/leadgen/{tenant_id}",
        get(verify_webhook).post(receive_webhook),
    )
}
