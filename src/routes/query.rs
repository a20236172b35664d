use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;
use sqlx::FromRow;
use tracing::{error, instrument};

use crate::state::AppState;

#[derive(Debug, Serialize, FromRow)]
pub struct MatchedInvoice {
    pub amount: i32,
    pub name: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/query", get(list_invoices))
}

/// Lists invoices caught by the fixed `amount = 666` filter. Unlike the
/// data layer, this route surfaces the raw error text in its 500 body.
#[instrument(skip(state))]
pub async fn list_invoices(State(state): State<AppState>) -> Response {
    let result = sqlx::query_as::<_, MatchedInvoice>(
        r#"
        SELECT invoices.amount, customers.name
        FROM invoices
        JOIN customers ON invoices.customer_id = customers.id
        WHERE invoices.amount = 666
        "#,
    )
    .fetch_all(&state.db)
    .await;

    match result {
        Ok(rows) => (StatusCode::OK, Json(rows)).into_response(),
        Err(e) => {
            error!(error = %e, "fixed-filter invoice listing failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
