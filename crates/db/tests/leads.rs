//! Integration tests for lead row lifecycle and the idempotency key.

use serde_json::json;
use sqlx::PgPool;

use leadflow_core::lead::{LeadStatus, REASON_INSUFFICIENT_BALANCE};
use leadflow_db::repositories::LeadRepo;

async fn seed_tenant(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO tenants (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("insert tenant")
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_source_lead_inserts_exactly_one_row(pool: PgPool) {
    let tenant_id = seed_tenant(&pool, "acme").await;
    let fields = json!({ "email": "a@b.com" });

    let first = LeadRepo::insert_pending(
        &pool, tenant_id, "form-1", "facebook", "lg-42", &fields, 30, 250,
    )
    .await
    .unwrap();
    assert!(first.is_some());

    let second = LeadRepo::insert_pending(
        &pool, tenant_id, "form-1", "facebook", "lg-42", &fields, 30, 250,
    )
    .await
    .unwrap();
    assert!(second.is_none(), "duplicate delivery must not insert");

    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM leads WHERE tenant_id = $1 AND source_lead_id = 'lg-42'",
    )
    .bind(tenant_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn same_source_lead_for_other_campaign_is_distinct(pool: PgPool) {
    let tenant_id = seed_tenant(&pool, "acme").await;
    let fields = json!({});

    let a = LeadRepo::insert_pending(
        &pool, tenant_id, "form-1", "facebook", "lg-42", &fields, 0, 0,
    )
    .await
    .unwrap();
    let b = LeadRepo::insert_pending(
        &pool, tenant_id, "form-2", "facebook", "lg-42", &fields, 0, 0,
    )
    .await
    .unwrap();
    assert!(a.is_some());
    assert!(b.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn lead_transitions_pending_to_delivered(pool: PgPool) {
    let tenant_id = seed_tenant(&pool, "acme").await;
    let lead_id = LeadRepo::insert_pending(
        &pool,
        tenant_id,
        "form-1",
        "facebook",
        "lg-1",
        &json!({ "email": "a@b.com" }),
        30,
        250,
    )
    .await
    .unwrap()
    .unwrap();

    let lead = LeadRepo::find_by_id(&pool, lead_id).await.unwrap().unwrap();
    assert_eq!(lead.status, LeadStatus::Pending.as_str());

    LeadRepo::mark_delivered(&pool, lead_id).await.unwrap();

    let lead = LeadRepo::find_by_id(&pool, lead_id).await.unwrap().unwrap();
    assert_eq!(lead.status, LeadStatus::Delivered.as_str());
    assert_eq!(lead.failure_reason, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn lead_transitions_pending_to_failed_with_reason(pool: PgPool) {
    let tenant_id = seed_tenant(&pool, "acme").await;
    let lead_id = LeadRepo::insert_pending(
        &pool, tenant_id, "form-1", "facebook", "lg-1", &json!({}), 0, 250,
    )
    .await
    .unwrap()
    .unwrap();

    LeadRepo::mark_failed(&pool, lead_id, REASON_INSUFFICIENT_BALANCE)
        .await
        .unwrap();

    let lead = LeadRepo::find_by_id(&pool, lead_id).await.unwrap().unwrap();
    assert_eq!(lead.status, LeadStatus::Failed.as_str());
    assert_eq!(
        lead.failure_reason.as_deref(),
        Some(REASON_INSUFFICIENT_BALANCE)
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn find_by_source_returns_the_persisted_shape(pool: PgPool) {
    let tenant_id = seed_tenant(&pool, "acme").await;
    let fields = json!({ "email": "a@b.com", "first_name": "J" });
    LeadRepo::insert_pending(
        &pool, tenant_id, "form-1", "facebook", "lg-7", &fields, 40, 250,
    )
    .await
    .unwrap();

    let lead = LeadRepo::find_by_source(&pool, tenant_id, "form-1", "lg-7")
        .await
        .unwrap()
        .expect("lead exists");
    assert_eq!(lead.platform, "facebook");
    assert_eq!(lead.fields, fields);
    assert_eq!(lead.quality_score, 40);
    assert_eq!(lead.cost_cents, 250);
}
