//! The lead settlement orchestrator.
//!
//! One inbound `(tenant, campaign, source_lead_id)` event runs through
//! resolve → fetch → map → score → filter → persist(pending) → charge →
//! deliver. Every expected failure exits as
//! [`SettlementOutcome::Rejected`] with a recorded reason; only
//! infrastructure errors (persistence) propagate as `Err`, and the ingress
//! converts those to a per-lead failure without aborting the batch.

use std::sync::Arc;

use serde_json::Value;

use leadflow_core::lead::{
    REASON_FETCH_FAILED, REASON_INSUFFICIENT_BALANCE, REASON_NO_CONFIG, REASON_QUALITY,
    REASON_RECHARGE_FAILED,
};
use leadflow_core::mapping::map_fields;
use leadflow_core::scoring::{quality_score, DEFAULT_DEMOGRAPHICS_MIN_KEYS};
use leadflow_core::types::DbId;
use leadflow_db::repositories::{ImportConfigRepo, LeadRepo, NotificationRepo};
use leadflow_db::DbPool;
use leadflow_platform::{LeadSource, RechargeProvider};

use crate::ledger::{Ledger, LedgerOutcome};

/// One lead event extracted from a webhook envelope.
#[derive(Debug, Clone)]
pub struct LeadEvent {
    pub tenant_id: DbId,
    /// The platform-side campaign/form identifier.
    pub campaign_id: String,
    /// The platform-side lead identifier (opaque).
    pub source_lead_id: String,
    /// Source platform name, e.g. `facebook`.
    pub platform: String,
}

/// Structured per-lead result returned to the ingress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettlementOutcome {
    /// The lead was charged, persisted as `delivered`, and notified.
    Settled { lead_id: DbId },
    /// A duplicate delivery of an already-settled lead: idempotent no-op.
    Duplicate { lead_id: Option<DbId> },
    /// The lead was rejected with a recorded reason. `lead_id` is set when
    /// the rejection happened after the pending row was persisted.
    Rejected {
        reason: &'static str,
        lead_id: Option<DbId>,
    },
}

/// Drives the settlement state machine. All collaborators are injected, so
/// tests run the real pipeline against fakes.
pub struct SettlementEngine {
    pool: DbPool,
    lead_source: Arc<dyn LeadSource>,
    recharge: Arc<dyn RechargeProvider>,
    demographics_min_keys: usize,
}

impl SettlementEngine {
    pub fn new(
        pool: DbPool,
        lead_source: Arc<dyn LeadSource>,
        recharge: Arc<dyn RechargeProvider>,
    ) -> Self {
        Self {
            pool,
            lead_source,
            recharge,
            demographics_min_keys: DEFAULT_DEMOGRAPHICS_MIN_KEYS,
        }
    }

    /// Settle one lead event end to end.
    ///
    /// `Err` means an infrastructure failure for this lead only; sibling
    /// leads in the batch are unaffected.
    pub async fn settle(&self, event: &LeadEvent) -> Result<SettlementOutcome, sqlx::Error> {
        // received → config_resolved
        let Some(config) = ImportConfigRepo::find_active(
            &self.pool,
            event.tenant_id,
            &event.campaign_id,
            &event.platform,
        )
        .await?
        else {
            tracing::info!(
                tenant_id = event.tenant_id,
                campaign_id = %event.campaign_id,
                platform = %event.platform,
                "No active import configuration, lead rejected"
            );
            return Ok(SettlementOutcome::Rejected {
                reason: REASON_NO_CONFIG,
                lead_id: None,
            });
        };

        // config_resolved → lead_fetched
        let raw = match self
            .lead_source
            .fetch_lead(&event.source_lead_id, &config.access_token)
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(
                    tenant_id = event.tenant_id,
                    leadgen_id = %event.source_lead_id,
                    error = %e,
                    "Platform lead fetch failed"
                );
                return Ok(SettlementOutcome::Rejected {
                    reason: REASON_FETCH_FAILED,
                    lead_id: None,
                });
            }
        };

        // lead_fetched → mapped → scored (both pure, neither can fail)
        let flat = raw.flatten();
        let fields = map_fields(&flat, &config.mapping_table());
        let score = quality_score(&fields, self.demographics_min_keys);

        // Quality filter runs before the ledger is ever touched.
        if let Some(min) = config.quality_score_min {
            if i16::from(score) < min {
                tracing::info!(
                    tenant_id = event.tenant_id,
                    leadgen_id = %event.source_lead_id,
                    score,
                    min,
                    "Lead below quality threshold"
                );
                return Ok(SettlementOutcome::Rejected {
                    reason: REASON_QUALITY,
                    lead_id: None,
                });
            }
        }

        // scored → persisted(pending). The row must exist before the ledger
        // runs so a crash between charge and delivery is reconcilable from
        // the pending row instead of silently losing money.
        let Some(lead_id) = LeadRepo::insert_pending(
            &self.pool,
            event.tenant_id,
            &event.campaign_id,
            &event.platform,
            &event.source_lead_id,
            &Value::Object(fields),
            i16::from(score),
            config.cost_per_lead_cents,
        )
        .await?
        else {
            // Duplicate delivery: the uniqueness invariant already holds a
            // row for this (tenant, campaign, source_lead_id). No-op.
            let existing = LeadRepo::find_by_source(
                &self.pool,
                event.tenant_id,
                &event.campaign_id,
                &event.source_lead_id,
            )
            .await?;
            tracing::info!(
                tenant_id = event.tenant_id,
                leadgen_id = %event.source_lead_id,
                "Duplicate lead delivery, skipping"
            );
            return Ok(SettlementOutcome::Duplicate {
                lead_id: existing.map(|l| l.id),
            });
        };

        // persisted(pending) → funded
        let outcome = Ledger::settle_charge(
            &self.pool,
            self.recharge.as_ref(),
            event.tenant_id,
            lead_id,
            config.cost_per_lead_cents,
            config.auto_recharge_enabled,
            config.recharge_amount_cents,
        )
        .await?;

        let reason = match outcome {
            LedgerOutcome::Charged => {
                // funded → settled(delivered)
                LeadRepo::mark_delivered(&self.pool, lead_id).await?;
                self.notify_delivered(event, lead_id, score).await;
                tracing::info!(
                    tenant_id = event.tenant_id,
                    lead_id,
                    score,
                    cost_cents = config.cost_per_lead_cents,
                    "Lead settled"
                );
                return Ok(SettlementOutcome::Settled { lead_id });
            }
            LedgerOutcome::InsufficientFunds => REASON_INSUFFICIENT_BALANCE,
            LedgerOutcome::RechargeFailed => REASON_RECHARGE_FAILED,
        };

        LeadRepo::mark_failed(&self.pool, lead_id, reason).await?;
        Ok(SettlementOutcome::Rejected {
            reason,
            lead_id: Some(lead_id),
        })
    }

    /// Fire-and-forget delivery notification. Failures are logged and
    /// swallowed; they never revert a settlement.
    async fn notify_delivered(&self, event: &LeadEvent, lead_id: DbId, score: u8) {
        let body = format!(
            "A new lead from campaign {} was imported with quality score {score}.",
            event.campaign_id
        );
        if let Err(e) = NotificationRepo::create(
            &self.pool,
            event.tenant_id,
            Some(lead_id),
            "New lead imported",
            &body,
        )
        .await
        {
            tracing::warn!(
                tenant_id = event.tenant_id,
                lead_id,
                error = %e,
                "Failed to create lead notification"
            );
        }
    }
}
