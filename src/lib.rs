//! Data-access layer for the Acme invoicing dashboard.
//!
//! The [`data`] modules hold the read-side queries the dashboard pages are
//! built from; [`app`] and [`routes`] carry the small HTTP surface around
//! them. All queries go through a shared [`sqlx::PgPool`] handed in by the
//! caller.

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod format;
pub mod routes;
pub mod state;
