//! Tenant balance row model.

use serde::Serialize;
use sqlx::FromRow;

use leadflow_core::types::{DbId, Timestamp};

/// A row from the `balances` table (one per tenant, lazily created).
///
/// `reserved_cents` is headroom for future hold support; the pipeline never
/// mutates it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Balance {
    pub id: DbId,
    pub tenant_id: DbId,
    pub balance_cents: i64,
    pub reserved_cents: i64,
    pub auto_recharge_enabled: bool,
    pub recharge_threshold_cents: i64,
    pub recharge_amount_cents: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
