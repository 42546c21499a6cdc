//! Repository for the `notifications` table.

use sqlx::PgPool;

use leadflow_core::types::DbId;

use crate::models::notification::Notification;

/// Column list for `notifications` queries.
const COLUMNS: &str = "id, tenant_id, lead_id, title, body, is_read, read_at, created_at";

/// Provides CRUD operations for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Create a notification for a tenant, returning the generated ID.
    pub async fn create(
        pool: &PgPool,
        tenant_id: DbId,
        lead_id: Option<DbId>,
        title: &str,
        body: &str,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO notifications (tenant_id, lead_id, title, body) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(tenant_id)
        .bind(lead_id)
        .bind(title)
        .bind(body)
        .fetch_one(pool)
        .await
    }

    /// List notifications for a tenant.
    ///
    /// When `unread_only` is `true`, only notifications with
    /// `is_read = false` are returned.
    pub async fn list_for_tenant(
        pool: &PgPool,
        tenant_id: DbId,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let filter = if unread_only {
            "AND is_read = false"
        } else {
            ""
        };
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE tenant_id = $1 {filter} \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(tenant_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
