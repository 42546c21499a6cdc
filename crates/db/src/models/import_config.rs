//! Import configuration row model.

use serde::Serialize;
use sqlx::FromRow;

use leadflow_core::types::{DbId, Timestamp};

/// A row from the `import_configs` table.
///
/// Owned by a tenant and keyed by a (campaign, platform) pair; read-only to
/// the settlement pipeline. `field_mapping` is a JSON object of canonical
/// field name → dotted source path.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ImportConfig {
    pub id: DbId,
    pub tenant_id: DbId,
    pub campaign_id: String,
    pub platform: String,
    pub access_token: String,
    pub field_mapping: serde_json::Value,
    pub cost_per_lead_cents: i64,
    pub auto_recharge_enabled: bool,
    pub recharge_amount_cents: i64,
    pub quality_score_min: Option<i16>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ImportConfig {
    /// The mapping table as an object, or an empty map for malformed JSON.
    pub fn mapping_table(&self) -> serde_json::Map<String, serde_json::Value> {
        self.field_mapping
            .as_object()
            .cloned()
            .unwrap_or_default()
    }
}
