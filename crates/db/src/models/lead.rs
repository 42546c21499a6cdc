//! Canonical lead row model.

use serde::Serialize;
use sqlx::FromRow;

use leadflow_core::types::{DbId, Timestamp};

/// A row from the `leads` table.
///
/// `status` holds one of the `leadflow_core::lead::LeadStatus` string codes;
/// `failure_reason` is set only for failed leads.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lead {
    pub id: DbId,
    pub tenant_id: DbId,
    pub campaign_id: String,
    pub platform: String,
    pub source_lead_id: String,
    pub fields: serde_json::Value,
    pub quality_score: i16,
    pub cost_cents: i64,
    pub status: String,
    pub failure_reason: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub imported_at: Timestamp,
    pub updated_at: Timestamp,
}
