//! Repository for the `leads` table.

use sqlx::PgPool;

use leadflow_core::lead::LeadStatus;
use leadflow_core::types::DbId;

use crate::models::lead::Lead;

/// Column list for `leads` queries.
const COLUMNS: &str = "id, tenant_id, campaign_id, platform, source_lead_id, fields, \
     quality_score, cost_cents, status, failure_reason, metadata, \
     imported_at, updated_at";

/// Provides lifecycle operations for canonical lead rows.
pub struct LeadRepo;

impl LeadRepo {
    /// Insert a lead in `pending` status, returning the generated ID.
    ///
    /// Returns `None` when a row with the same
    /// `(tenant_id, campaign_id, source_lead_id)` already exists — a
    /// duplicate webhook delivery, handled as an idempotent no-op by the
    /// caller. The insert races safely: `ON CONFLICT DO NOTHING` means two
    /// concurrent deliveries of the same lead produce exactly one row.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert_pending(
        pool: &PgPool,
        tenant_id: DbId,
        campaign_id: &str,
        platform: &str,
        source_lead_id: &str,
        fields: &serde_json::Value,
        quality_score: i16,
        cost_cents: i64,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO leads \
               (tenant_id, campaign_id, platform, source_lead_id, fields, \
                quality_score, cost_cents, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, 'pending') \
             ON CONFLICT (tenant_id, campaign_id, source_lead_id) DO NOTHING \
             RETURNING id",
        )
        .bind(tenant_id)
        .bind(campaign_id)
        .bind(platform)
        .bind(source_lead_id)
        .bind(fields)
        .bind(quality_score)
        .bind(cost_cents)
        .fetch_optional(pool)
        .await
    }

    /// Find a lead by its platform-side identity.
    pub async fn find_by_source(
        pool: &PgPool,
        tenant_id: DbId,
        campaign_id: &str,
        source_lead_id: &str,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM leads \
             WHERE tenant_id = $1 AND campaign_id = $2 AND source_lead_id = $3"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(tenant_id)
            .bind(campaign_id)
            .bind(source_lead_id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch a lead by ID.
    pub async fn find_by_id(pool: &PgPool, lead_id: DbId) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leads WHERE id = $1");
        sqlx::query_as::<_, Lead>(&query)
            .bind(lead_id)
            .fetch_optional(pool)
            .await
    }

    /// Transition a pending lead to `delivered`.
    pub async fn mark_delivered(pool: &PgPool, lead_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE leads \
             SET status = $2, failure_reason = NULL, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(lead_id)
        .bind(LeadStatus::Delivered.as_str())
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Transition a pending lead to `failed` with a recorded reason.
    pub async fn mark_failed(
        pool: &PgPool,
        lead_id: DbId,
        reason: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE leads \
             SET status = $2, failure_reason = $3, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(lead_id)
        .bind(LeadStatus::Failed.as_str())
        .bind(reason)
        .execute(pool)
        .await?;
        Ok(())
    }
}
