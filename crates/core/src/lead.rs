//! Canonical lead statuses and rejection reasons.
//!
//! A lead row is inserted with status `pending` before the ledger is touched
//! and transitions to exactly one of `delivered` or `failed`. Rejection
//! reasons are stored verbatim on the lead row, so the strings here are a
//! stable contract with downstream consumers.

use serde::{Deserialize, Serialize};

/// Persisted lifecycle state of a canonical lead row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    Pending,
    Delivered,
    Failed,
}

impl LeadStatus {
    /// The string code stored in the `leads.status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::Pending => "pending",
            LeadStatus::Delivered => "delivered",
            LeadStatus::Failed => "failed",
        }
    }

    /// Parse a status column value. Unknown codes return `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(LeadStatus::Pending),
            "delivered" => Some(LeadStatus::Delivered),
            "failed" => Some(LeadStatus::Failed),
            _ => None,
        }
    }
}

/// No active import configuration matched the event.
pub const REASON_NO_CONFIG: &str = "No active configuration";
/// The platform lead fetch failed (transport, non-2xx, or malformed payload).
pub const REASON_FETCH_FAILED: &str = "Fetch failed";
/// The lead scored below the config's minimum quality threshold.
pub const REASON_QUALITY: &str = "Quality below threshold";
/// The tenant balance could not cover the lead cost.
pub const REASON_INSUFFICIENT_BALANCE: &str = "Insufficient balance";
/// Auto-recharge was attempted and the payment collaborator declined.
pub const REASON_RECHARGE_FAILED: &str = "Insufficient balance, recharge failed";
