//! Abstract payment collaborator for the auto-recharge path.
//!
//! Card processing is owned by the checkout subsystem; the ledger only asks
//! "can you top this tenant up by N cents" and receives yes/no. A declined
//! recharge is a normal business outcome, not an error.

use leadflow_core::types::DbId;

/// Error type for recharge attempts that could not complete at all
/// (as opposed to completing with a decline).
#[derive(Debug, thiserror::Error)]
pub enum RechargeError {
    #[error("Recharge provider unavailable: {0}")]
    Unavailable(String),
}

/// The abstract "attempt recharge" operation.
#[async_trait::async_trait]
pub trait RechargeProvider: Send + Sync {
    /// Try to top up a tenant's balance.
    ///
    /// `Ok(true)` means the payment went through and the caller may credit
    /// the balance; `Ok(false)` means the provider declined.
    async fn attempt_recharge(
        &self,
        tenant_id: DbId,
        amount_cents: i64,
    ) -> Result<bool, RechargeError>;
}

/// Default provider used when no payment integration is configured:
/// every attempt is declined, so insufficient-balance leads fail with the
/// recharge-failed reason instead of hanging.
pub struct DeniedRecharge;

#[async_trait::async_trait]
impl RechargeProvider for DeniedRecharge {
    async fn attempt_recharge(
        &self,
        tenant_id: DbId,
        amount_cents: i64,
    ) -> Result<bool, RechargeError> {
        tracing::warn!(
            tenant_id,
            amount_cents,
            "Auto-recharge requested but no payment provider is configured"
        );
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn denied_recharge_always_declines() {
        let declined = DeniedRecharge.attempt_recharge(1, 1000).await.unwrap();
        assert!(!declined);
    }
}
