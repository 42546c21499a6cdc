//! Ledger transaction row model.

use serde::Serialize;
use sqlx::FromRow;

use leadflow_core::types::{DbId, Timestamp};

/// A row from the append-only `transactions` table.
///
/// Negative `amount_cents` is a debit (lead charge), positive is a credit
/// (recharge).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Transaction {
    pub id: DbId,
    pub tenant_id: DbId,
    pub lead_id: Option<DbId>,
    pub amount_cents: i64,
    pub reason: String,
    pub created_at: Timestamp,
}
