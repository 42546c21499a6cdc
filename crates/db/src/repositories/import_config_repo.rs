//! Repository for the `import_configs` table.

use sqlx::PgPool;

use leadflow_core::types::DbId;

use crate::models::import_config::ImportConfig;

/// Column list for `import_configs` queries.
const COLUMNS: &str = "id, tenant_id, campaign_id, platform, access_token, field_mapping, \
     cost_per_lead_cents, auto_recharge_enabled, recharge_amount_cents, \
     quality_score_min, is_active, created_at, updated_at";

/// Read access to import configurations. The pipeline never writes them;
/// they are managed by the tenant-facing configuration surface.
pub struct ImportConfigRepo;

impl ImportConfigRepo {
    /// Find the single active config for a (tenant, campaign, platform)
    /// triple.
    ///
    /// `None` is a normal, expected outcome (the lead is rejected with a
    /// recorded reason), never a system error. Uniqueness of the active row
    /// is enforced by the `uq_import_configs_active` partial index.
    pub async fn find_active(
        pool: &PgPool,
        tenant_id: DbId,
        campaign_id: &str,
        platform: &str,
    ) -> Result<Option<ImportConfig>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM import_configs \
             WHERE tenant_id = $1 AND campaign_id = $2 AND platform = $3 \
               AND is_active"
        );
        sqlx::query_as::<_, ImportConfig>(&query)
            .bind(tenant_id)
            .bind(campaign_id)
            .bind(platform)
            .fetch_optional(pool)
            .await
    }
}
