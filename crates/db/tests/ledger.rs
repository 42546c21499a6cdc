//! Integration tests for the balance ledger primitives.

use futures::future::join_all;
use sqlx::PgPool;

use leadflow_db::repositories::{BalanceRepo, TransactionRepo};

/// Insert a tenant row and return its id.
async fn seed_tenant(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO tenants (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("insert tenant")
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn balance_is_lazily_created_at_zero(pool: PgPool) {
    let tenant_id = seed_tenant(&pool, "acme").await;

    let balance = BalanceRepo::get_or_create(&pool, tenant_id).await.unwrap();
    assert_eq!(balance.tenant_id, tenant_id);
    assert_eq!(balance.balance_cents, 0);
    assert_eq!(balance.reserved_cents, 0);

    // A second query returns the same row, not a second one.
    let again = BalanceRepo::get_or_create(&pool, tenant_id).await.unwrap();
    assert_eq!(again.id, balance.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn debit_with_sufficient_funds_appends_a_transaction(pool: PgPool) {
    let tenant_id = seed_tenant(&pool, "acme").await;
    BalanceRepo::credit(&pool, tenant_id, 1000, None, "Top-up")
        .await
        .unwrap();

    let charged = BalanceRepo::try_debit(&pool, tenant_id, 250, None, "Lead charge")
        .await
        .unwrap();
    assert!(charged);

    let balance = BalanceRepo::get_or_create(&pool, tenant_id).await.unwrap();
    assert_eq!(balance.balance_cents, 750);

    // One credit + one debit.
    let txns = TransactionRepo::list_for_tenant(&pool, tenant_id, 10, 0)
        .await
        .unwrap();
    assert_eq!(txns.len(), 2);
    assert_eq!(txns[0].amount_cents, -250);
    assert_eq!(txns[1].amount_cents, 1000);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn debit_with_insufficient_funds_mutates_nothing(pool: PgPool) {
    let tenant_id = seed_tenant(&pool, "acme").await;
    BalanceRepo::credit(&pool, tenant_id, 100, None, "Top-up")
        .await
        .unwrap();

    let charged = BalanceRepo::try_debit(&pool, tenant_id, 250, None, "Lead charge")
        .await
        .unwrap();
    assert!(!charged);

    let balance = BalanceRepo::get_or_create(&pool, tenant_id).await.unwrap();
    assert_eq!(balance.balance_cents, 100);

    // No debit transaction was recorded.
    let txns = TransactionRepo::list_for_tenant(&pool, tenant_id, 10, 0)
        .await
        .unwrap();
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0].amount_cents, 100);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn credit_upserts_a_missing_balance_row(pool: PgPool) {
    let tenant_id = seed_tenant(&pool, "acme").await;

    BalanceRepo::credit(&pool, tenant_id, 500, None, "Recharge")
        .await
        .unwrap();

    let balance = BalanceRepo::get_or_create(&pool, tenant_id).await.unwrap();
    assert_eq!(balance.balance_cents, 500);
}

/// No-overdraft invariant: with balance B and per-lead cost C, at most
/// floor(B / C) of N concurrent debits may succeed, and the balance never
/// goes negative.
#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_debits_never_overdraw(pool: PgPool) {
    let tenant_id = seed_tenant(&pool, "acme").await;
    BalanceRepo::credit(&pool, tenant_id, 1000, None, "Top-up")
        .await
        .unwrap();

    // 8 concurrent attempts at 250 cents each against a 1000-cent balance:
    // exactly 4 may win.
    let attempts = (0..8).map(|_| {
        let pool = pool.clone();
        async move {
            BalanceRepo::try_debit(&pool, tenant_id, 250, None, "Lead charge")
                .await
                .unwrap()
        }
    });
    let results = join_all(attempts).await;

    let succeeded = results.iter().filter(|ok| **ok).count();
    assert_eq!(succeeded, 4);

    let balance = BalanceRepo::get_or_create(&pool, tenant_id).await.unwrap();
    assert_eq!(balance.balance_cents, 0);

    let debits = TransactionRepo::count_for_tenant(&pool, tenant_id)
        .await
        .unwrap();
    // 1 credit + 4 debits.
    assert_eq!(debits, 5);
}
