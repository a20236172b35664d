use thiserror::Error;
use tracing::error;

/// The only error the query layer surfaces: a fixed, operation-specific
/// message. The driver error is logged at the point of capture and kept as
/// the source for diagnostics; callers see the label only.
#[derive(Debug, Error)]
#[error("Failed to fetch {label}.")]
pub struct DataFetchError {
    label: &'static str,
    #[source]
    source: sqlx::Error,
}

impl DataFetchError {
    pub(crate) fn new(label: &'static str, source: sqlx::Error) -> Self {
        error!(error = %source, label, "database query failed");
        Self { label, source }
    }

    /// Operation label baked into the message, e.g. `"latest invoices"`.
    pub fn label(&self) -> &'static str {
        self.label
    }
}
