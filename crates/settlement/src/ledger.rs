//! Ledger policy: check, optional auto-recharge, atomic deduct.
//!
//! The policy layer never reads-then-writes the balance: the actual
//! decrement is [`BalanceRepo::try_debit`]'s conditional UPDATE, so a
//! concurrent settlement that drains the balance between our check and our
//! deduct surfaces as a failed debit, never as a negative balance or a
//! partial charge.

use sqlx::PgPool;

use leadflow_core::types::DbId;
use leadflow_db::repositories::BalanceRepo;
use leadflow_platform::RechargeProvider;

/// Transaction reason recorded for lead charges.
pub const REASON_LEAD_CHARGE: &str = "Lead charge";
/// Transaction reason recorded for auto-recharge credits.
pub const REASON_AUTO_RECHARGE: &str = "Auto-recharge";

/// Terminal result of one charge attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerOutcome {
    /// The balance was debited and the audit transaction recorded.
    Charged,
    /// Insufficient funds and auto-recharge disabled (or the race for the
    /// last funds was lost after a recharge).
    InsufficientFunds,
    /// Insufficient funds, auto-recharge attempted and declined or failed.
    RechargeFailed,
}

/// The balance ledger state machine, entered once per settlement attempt.
pub struct Ledger;

impl Ledger {
    /// Charge `cost_cents` to a tenant for a lead.
    ///
    /// Steps: read the balance (lazily creating it), top up via the payment
    /// collaborator when short and auto-recharge is enabled, then perform
    /// the atomic conditional deduct. Zero-cost leads are a no-op charge:
    /// nothing is debited and no transaction row is written.
    pub async fn settle_charge(
        pool: &PgPool,
        recharge: &dyn RechargeProvider,
        tenant_id: DbId,
        lead_id: DbId,
        cost_cents: i64,
        auto_recharge_enabled: bool,
        recharge_amount_cents: i64,
    ) -> Result<LedgerOutcome, sqlx::Error> {
        if cost_cents == 0 {
            return Ok(LedgerOutcome::Charged);
        }

        let balance = BalanceRepo::get_or_create(pool, tenant_id).await?;

        if balance.balance_cents < cost_cents {
            if !auto_recharge_enabled {
                tracing::info!(
                    tenant_id,
                    lead_id,
                    balance_cents = balance.balance_cents,
                    cost_cents,
                    "Insufficient balance, auto-recharge disabled"
                );
                return Ok(LedgerOutcome::InsufficientFunds);
            }

            let approved = match recharge
                .attempt_recharge(tenant_id, recharge_amount_cents)
                .await
            {
                Ok(approved) => approved,
                Err(e) => {
                    tracing::warn!(tenant_id, lead_id, error = %e, "Recharge attempt errored");
                    false
                }
            };

            if !approved {
                return Ok(LedgerOutcome::RechargeFailed);
            }

            BalanceRepo::credit(
                pool,
                tenant_id,
                recharge_amount_cents,
                None,
                REASON_AUTO_RECHARGE,
            )
            .await?;
            tracing::info!(
                tenant_id,
                amount_cents = recharge_amount_cents,
                "Auto-recharge credited"
            );
        }

        // The conditional UPDATE is the authority on sufficiency; a lost
        // race against a concurrent deduction lands here as `false`.
        let charged =
            BalanceRepo::try_debit(pool, tenant_id, cost_cents, Some(lead_id), REASON_LEAD_CHARGE)
                .await?;

        if charged {
            Ok(LedgerOutcome::Charged)
        } else {
            tracing::info!(tenant_id, lead_id, cost_cents, "Debit lost race, no funds");
            Ok(LedgerOutcome::InsufficientFunds)
        }
    }
}
