use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::DataFetchError;
use crate::format::format_currency;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CustomerField {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, FromRow)]
struct CustomersTableRow {
    id: Uuid,
    name: String,
    email: String,
    image_url: String,
    total_invoices: i64,
    total_pending: Option<i64>,
    total_paid: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormattedCustomersTableRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_invoices: i64,
    pub total_pending: String,
    pub total_paid: String,
}

impl From<CustomersTableRow> for FormattedCustomersTableRow {
    fn from(row: CustomersTableRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            image_url: row.image_url,
            total_invoices: row.total_invoices,
            total_pending: format_currency(row.total_pending.unwrap_or(0)),
            total_paid: format_currency(row.total_paid.unwrap_or(0)),
        }
    }
}

pub async fn fetch_customers(db: &PgPool) -> Result<Vec<CustomerField>, DataFetchError> {
    let rows = sqlx::query_as::<_, CustomerField>(
        r#"
        SELECT id, name
        FROM customers
        ORDER BY name ASC
        "#,
    )
    .fetch_all(db)
    .await
    .map_err(|e| DataFetchError::new("customers", e))?;
    Ok(rows)
}

/// Fetch per-customer invoice aggregates for customers whose name or email
/// contains `query` (case-insensitive), ordered by name. Customers without
/// invoices show zero totals.
pub async fn fetch_filtered_customers(
    db: &PgPool,
    query: &str,
) -> Result<Vec<FormattedCustomersTableRow>, DataFetchError> {
    let rows = sqlx::query_as::<_, CustomersTableRow>(
        r#"
        SELECT customers.id, customers.name, customers.email, customers.image_url,
               COUNT(invoices.id) AS total_invoices,
               SUM(CASE WHEN invoices.status = 'pending' THEN invoices.amount ELSE 0 END) AS total_pending,
               SUM(CASE WHEN invoices.status = 'paid' THEN invoices.amount ELSE 0 END) AS total_paid
        FROM customers
        LEFT JOIN invoices ON customers.id = invoices.customer_id
        WHERE customers.name ILIKE $1 OR customers.email ILIKE $1
        GROUP BY customers.id, customers.name, customers.email, customers.image_url
        ORDER BY customers.name ASC
        "#,
    )
    .bind(format!("%{query}%"))
    .fetch_all(db)
    .await
    .map_err(|e| DataFetchError::new("customer table", e))?;

    Ok(rows.into_iter().map(FormattedCustomersTableRow::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_row(pending: Option<i64>, paid: Option<i64>) -> CustomersTableRow {
        CustomersTableRow {
            id: Uuid::new_v4(),
            name: "Delba de Oliveira".into(),
            email: "delba@oliveira.com".into(),
            image_url: "/customers/delba-de-oliveira.png".into(),
            total_invoices: 2,
            total_pending: pending,
            total_paid: paid,
        }
    }

    #[test]
    fn totals_are_formatted_as_currency() {
        let formatted = FormattedCustomersTableRow::from(raw_row(Some(500), Some(123_456)));
        assert_eq!(formatted.total_pending, "$5.00");
        assert_eq!(formatted.total_paid, "$1,234.56");
        assert_eq!(formatted.total_invoices, 2);
    }

    #[test]
    fn missing_sums_default_to_zero() {
        let formatted = FormattedCustomersTableRow::from(raw_row(None, None));
        assert_eq!(formatted.total_pending, "$0.00");
        assert_eq!(formatted.total_paid, "$0.00");
    }
}
