//! Read-side queries behind the dashboard pages.
//!
//! Every function here is stateless: it takes the shared [`sqlx::PgPool`]
//! as an argument, runs one or more parameterized statements, reshapes the
//! rows for display, and maps any driver failure to
//! [`crate::error::DataFetchError`] with a fixed per-operation message.

pub mod customers;
pub mod dashboard;
pub mod invoices;
