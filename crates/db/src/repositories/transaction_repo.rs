//! Repository for the append-only `transactions` table.
//!
//! Rows are only ever written by [`BalanceRepo`](crate::repositories::BalanceRepo)
//! inside its debit/credit transactions; this repo is the read side.

use sqlx::PgPool;

use leadflow_core::types::DbId;

use crate::models::transaction::Transaction;

/// Column list for `transactions` queries.
const COLUMNS: &str = "id, tenant_id, lead_id, amount_cents, reason, created_at";

/// Read access to the ledger audit trail.
pub struct TransactionRepo;

impl TransactionRepo {
    /// List a tenant's transactions, newest first.
    pub async fn list_for_tenant(
        pool: &PgPool,
        tenant_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM transactions \
             WHERE tenant_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Transaction>(&query)
            .bind(tenant_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count transactions linked to a lead.
    pub async fn count_for_lead(pool: &PgPool, lead_id: DbId) -> Result<i64, sqlx::Error> {
        let count: Option<i64> =
            sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE lead_id = $1")
                .bind(lead_id)
                .fetch_one(pool)
                .await?;
        Ok(count.unwrap_or(0))
    }

    /// Count all transactions for a tenant.
    pub async fn count_for_tenant(pool: &PgPool, tenant_id: DbId) -> Result<i64, sqlx::Error> {
        let count: Option<i64> =
            sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE tenant_id = $1")
                .bind(tenant_id)
                .fetch_one(pool)
                .await?;
        Ok(count.unwrap_or(0))
    }
}
