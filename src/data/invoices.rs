use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::Date;
use uuid::Uuid;

use crate::error::DataFetchError;

pub const INVOICES_PER_PAGE: i64 = 6;

// Shared by the paged fetch and the page count so the two always agree on
// what matches. A term matches when it appears, case-insensitively, in the
// customer name or email, the amount or date rendered as text, or the
// status.
const SEARCH_FILTER: &str = r#"
            customers.name ILIKE $1
            OR customers.email ILIKE $1
            OR invoices.amount::text ILIKE $1
            OR invoices.date::text ILIKE $1
            OR invoices.status ILIKE $1"#;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InvoicesTableRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub date: Date,
    pub amount: i32,
    pub status: String,
}

#[derive(Debug, Clone, FromRow)]
struct InvoiceFormRow {
    id: Uuid,
    customer_id: Uuid,
    amount: i32,
    status: String,
}

/// Single invoice as the edit form consumes it, with the stored
/// minor-units amount divided into a decimal dollar value.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceForm {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub amount: f64,
    pub status: String,
}

impl From<InvoiceFormRow> for InvoiceForm {
    fn from(row: InvoiceFormRow) -> Self {
        Self {
            id: row.id,
            customer_id: row.customer_id,
            amount: f64::from(row.amount) / 100.0,
            status: row.status,
        }
    }
}

fn search_pattern(term: &str) -> String {
    format!("%{term}%")
}

fn page_offset(page: u32) -> i64 {
    i64::from(page.saturating_sub(1)) * INVOICES_PER_PAGE
}

fn page_count(matching: i64) -> i64 {
    (matching + INVOICES_PER_PAGE - 1) / INVOICES_PER_PAGE
}

/// Fetch one page of invoices matching `query`, newest first. `page` is
/// 1-based; each page holds at most [`INVOICES_PER_PAGE`] rows.
pub async fn fetch_filtered_invoices(
    db: &PgPool,
    query: &str,
    page: u32,
) -> Result<Vec<InvoicesTableRow>, DataFetchError> {
    let sql = format!(
        r#"
        SELECT invoices.id, invoices.customer_id, customers.name, customers.email,
               customers.image_url, invoices.date, invoices.amount, invoices.status
        FROM invoices
        JOIN customers ON invoices.customer_id = customers.id
        WHERE {SEARCH_FILTER}
        ORDER BY invoices.date DESC
        LIMIT $2 OFFSET $3
        "#
    );

    let rows = sqlx::query_as::<_, InvoicesTableRow>(&sql)
        .bind(search_pattern(query))
        .bind(INVOICES_PER_PAGE)
        .bind(page_offset(page))
        .fetch_all(db)
        .await
        .map_err(|e| DataFetchError::new("invoices", e))?;
    Ok(rows)
}

/// Count the pages the invoice table needs for `query`, using the same
/// filter as [`fetch_filtered_invoices`].
pub async fn fetch_invoices_pages(db: &PgPool, query: &str) -> Result<i64, DataFetchError> {
    let sql = format!(
        r#"
        SELECT COUNT(*)
        FROM invoices
        JOIN customers ON invoices.customer_id = customers.id
        WHERE {SEARCH_FILTER}
        "#
    );

    let matching = sqlx::query_scalar::<_, i64>(&sql)
        .bind(search_pattern(query))
        .fetch_one(db)
        .await
        .map_err(|e| DataFetchError::new("total number of invoices", e))?;
    Ok(page_count(matching))
}

/// Look up a single invoice for the edit form. A missing id is `Ok(None)`,
/// not an error; only a failing query maps to [`DataFetchError`].
pub async fn fetch_invoice_by_id(
    db: &PgPool,
    id: Uuid,
) -> Result<Option<InvoiceForm>, DataFetchError> {
    let row = sqlx::query_as::<_, InvoiceFormRow>(
        r#"
        SELECT invoices.id, invoices.customer_id, invoices.amount, invoices.status
        FROM invoices
        WHERE invoices.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
    .map_err(|e| DataFetchError::new("invoice", e))?;

    Ok(row.map(InvoiceForm::from))
}
