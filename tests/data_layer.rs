//! Exercises the query layer against a pool whose every acquire fails,
//! checking the uniform failure contract: each operation rejects with its
//! own fixed label and nothing else leaks to the caller.

use std::time::Duration;

use acme_dashboard::data::{customers, dashboard, invoices};
use acme_dashboard::state::AppState;
use uuid::Uuid;

fn bad_pool() -> sqlx::PgPool {
    AppState::fake().db
}

#[tokio::test]
async fn every_operation_reports_its_own_label() {
    let db = bad_pool();

    let err = dashboard::fetch_revenue(&db).await.unwrap_err();
    assert_eq!(err.label(), "revenue");

    let err = dashboard::fetch_latest_invoices(&db).await.unwrap_err();
    assert_eq!(err.label(), "latest invoices");

    let err = dashboard::fetch_card_data(&db).await.unwrap_err();
    assert_eq!(err.label(), "card data");

    let err = invoices::fetch_filtered_invoices(&db, "lee", 1)
        .await
        .unwrap_err();
    assert_eq!(err.label(), "invoices");

    let err = invoices::fetch_invoices_pages(&db, "lee").await.unwrap_err();
    assert_eq!(err.label(), "total number of invoices");

    let err = invoices::fetch_invoice_by_id(&db, Uuid::new_v4())
        .await
        .unwrap_err();
    assert_eq!(err.label(), "invoice");

    let err = customers::fetch_customers(&db).await.unwrap_err();
    assert_eq!(err.label(), "customers");

    let err = customers::fetch_filtered_customers(&db, "lee")
        .await
        .unwrap_err();
    assert_eq!(err.label(), "customer table");
}

#[tokio::test]
async fn failure_message_is_fixed_per_operation() {
    let db = bad_pool();

    let err = dashboard::fetch_revenue(&db).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch revenue.");

    let err = invoices::fetch_invoices_pages(&db, "").await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch total number of invoices.");
}

#[tokio::test]
async fn pool_failure_on_a_lookup_is_an_error_not_a_miss() {
    let db = bad_pool();

    // Only an absent row may become None; a dead pool must surface as Err.
    let result = invoices::fetch_invoice_by_id(&db, Uuid::new_v4()).await;
    assert!(result.is_err());
}

#[tokio::test(start_paused = true)]
async fn revenue_delay_elapses_before_the_query_runs() {
    let db = bad_pool();

    let started = tokio::time::Instant::now();
    let err = dashboard::fetch_revenue_delayed(&db, Duration::from_secs(30))
        .await
        .unwrap_err();

    assert_eq!(err.label(), "revenue");
    assert!(started.elapsed() >= Duration::from_secs(30));
}
