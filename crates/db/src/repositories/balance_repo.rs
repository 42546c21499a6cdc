//! Repository for the `balances` table — the ledger's atomic primitives.
//!
//! Two webhook deliveries can settle leads for the same tenant at the same
//! time, so the debit is expressed as a single conditional UPDATE at the
//! storage layer (`... WHERE balance_cents >= amount`), never as a
//! read-then-write pair. Losing the race surfaces as a failed debit, not a
//! negative balance.

use sqlx::PgPool;

use leadflow_core::types::DbId;

use crate::models::balance::Balance;

/// Column list for `balances` queries.
const COLUMNS: &str = "id, tenant_id, balance_cents, reserved_cents, auto_recharge_enabled, \
     recharge_threshold_cents, recharge_amount_cents, created_at, updated_at";

/// Atomic balance mutations plus the lazy-create read path.
pub struct BalanceRepo;

impl BalanceRepo {
    /// Fetch a tenant's balance, creating a zero-seeded row on first query.
    pub async fn get_or_create(pool: &PgPool, tenant_id: DbId) -> Result<Balance, sqlx::Error> {
        sqlx::query(
            "INSERT INTO balances (tenant_id) VALUES ($1) \
             ON CONFLICT (tenant_id) DO NOTHING",
        )
        .bind(tenant_id)
        .execute(pool)
        .await?;

        let query = format!("SELECT {COLUMNS} FROM balances WHERE tenant_id = $1");
        sqlx::query_as::<_, Balance>(&query)
            .bind(tenant_id)
            .fetch_one(pool)
            .await
    }

    /// Atomically debit `amount_cents` and append the audit transaction.
    ///
    /// The decrement and the transaction row commit or roll back together.
    /// Returns `false` without any mutation when the conditional update
    /// matches no row — insufficient funds, including the case where a
    /// concurrent debit drained the balance after the caller's check.
    pub async fn try_debit(
        pool: &PgPool,
        tenant_id: DbId,
        amount_cents: i64,
        lead_id: Option<DbId>,
        reason: &str,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query(
            "UPDATE balances \
             SET balance_cents = balance_cents - $2, updated_at = NOW() \
             WHERE tenant_id = $1 AND balance_cents >= $2",
        )
        .bind(tenant_id)
        .bind(amount_cents)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query(
            "INSERT INTO transactions (tenant_id, lead_id, amount_cents, reason) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(tenant_id)
        .bind(lead_id)
        .bind(-amount_cents)
        .bind(reason)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Atomically credit `amount_cents` and append the audit transaction.
    ///
    /// Upserts the balance row, so a recharge for a tenant with no balance
    /// row yet still lands.
    pub async fn credit(
        pool: &PgPool,
        tenant_id: DbId,
        amount_cents: i64,
        lead_id: Option<DbId>,
        reason: &str,
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "INSERT INTO balances (tenant_id, balance_cents) VALUES ($1, $2) \
             ON CONFLICT (tenant_id) DO UPDATE \
             SET balance_cents = balances.balance_cents + EXCLUDED.balance_cents, \
                 updated_at = NOW()",
        )
        .bind(tenant_id)
        .bind(amount_cents)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO transactions (tenant_id, lead_id, amount_cents, reason) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(tenant_id)
        .bind(lead_id)
        .bind(amount_cents)
        .bind(reason)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }
}
