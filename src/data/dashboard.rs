use std::time::Duration;

use serde::Serialize;
use sqlx::{FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

use crate::error::DataFetchError;
use crate::format::format_currency;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Revenue {
    pub month: String,
    pub revenue: i32,
}

#[derive(Debug, Clone, FromRow)]
struct LatestInvoiceRow {
    id: Uuid,
    name: String,
    image_url: String,
    email: String,
    amount: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct LatestInvoice {
    pub id: Uuid,
    pub name: String,
    pub image_url: String,
    pub email: String,
    pub amount: String,
}

impl From<LatestInvoiceRow> for LatestInvoice {
    fn from(row: LatestInvoiceRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            image_url: row.image_url,
            email: row.email,
            amount: format_currency(i64::from(row.amount)),
        }
    }
}

#[derive(Debug, FromRow)]
struct InvoiceStatusTotals {
    paid: Option<i64>,
    pending: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardData {
    pub number_of_invoices: i64,
    pub number_of_customers: i64,
    pub total_paid_invoices: String,
    pub total_pending_invoices: String,
}

pub async fn fetch_revenue(db: &PgPool) -> Result<Vec<Revenue>, DataFetchError> {
    fetch_revenue_delayed(db, Duration::ZERO).await
}

/// Same as [`fetch_revenue`], but sleeps for `artificial_delay` before the
/// query goes out. The reference frontend uses this to exercise its loading
/// states; the delay elapses in full and the whole result set is awaited
/// before returning.
pub async fn fetch_revenue_delayed(
    db: &PgPool,
    artificial_delay: Duration,
) -> Result<Vec<Revenue>, DataFetchError> {
    if !artificial_delay.is_zero() {
        debug!(delay_ms = artificial_delay.as_millis() as u64, "delaying revenue fetch");
        tokio::time::sleep(artificial_delay).await;
    }

    let rows = sqlx::query_as::<_, Revenue>("SELECT month, revenue FROM revenue")
        .fetch_all(db)
        .await
        .map_err(|e| DataFetchError::new("revenue", e))?;
    Ok(rows)
}

/// Fetch the five most recently dated invoices joined with their customer,
/// newest first, amounts formatted for display.
pub async fn fetch_latest_invoices(db: &PgPool) -> Result<Vec<LatestInvoice>, DataFetchError> {
    let rows = sqlx::query_as::<_, LatestInvoiceRow>(
        r#"
        SELECT invoices.id, customers.name, customers.image_url, customers.email, invoices.amount
        FROM invoices
        JOIN customers ON invoices.customer_id = customers.id
        ORDER BY invoices.date DESC
        LIMIT 5
        "#,
    )
    .fetch_all(db)
    .await
    .map_err(|e| DataFetchError::new("latest invoices", e))?;

    Ok(rows.into_iter().map(LatestInvoice::from).collect())
}

/// Fetch the dashboard card aggregates. The three statements are
/// independent, so they run concurrently against the pool; the whole
/// operation fails if any one of them fails.
pub async fn fetch_card_data(db: &PgPool) -> Result<CardData, DataFetchError> {
    let invoice_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM invoices").fetch_one(db);
    let customer_count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers").fetch_one(db);
    let status_totals = sqlx::query_as::<_, InvoiceStatusTotals>(
        r#"
        SELECT
            SUM(CASE WHEN status = 'paid' THEN amount ELSE 0 END) AS paid,
            SUM(CASE WHEN status = 'pending' THEN amount ELSE 0 END) AS pending
        FROM invoices
        "#,
    )
    .fetch_one(db);

    let (number_of_invoices, number_of_customers, totals) =
        tokio::try_join!(invoice_count, customer_count, status_totals)
            .map_err(|e| DataFetchError::new("card data", e))?;

    Ok(CardData {
        number_of_invoices,
        number_of_customers,
        total_paid_invoices: format_currency(totals.paid.unwrap_or(0)),
        total_pending_invoices: format_currency(totals.pending.unwrap_or(0)),
    })
}
