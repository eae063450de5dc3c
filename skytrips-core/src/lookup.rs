use async_trait::async_trait;

use crate::location::LocationGroup;

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Lookup request failed: {0}")]
    Request(String),

    #[error("Lookup response could not be decoded: {0}")]
    Decode(String),
}

/// The remote location service behind the autocomplete fields.
#[async_trait]
pub trait LocationLookup: Send + Sync {
    /// Free-text query returning municipality-grouped candidates.
    async fn search(&self, query: &str) -> Result<Vec<LocationGroup>, LookupError>;

    /// Best-effort popularity bump for a picked location. Callers treat this
    /// as fire-and-forget; a failure must never surface past the caller.
    async fn mark_popular(&self, code: &str) -> Result<(), LookupError>;
}
