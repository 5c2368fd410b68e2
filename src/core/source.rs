//! Rate source abstraction

use async_trait::async_trait;
use thiserror::Error;

use super::rates::RateTable;

/// Why a rate fetch failed. The store reports all of these to users as a
/// single message; the variants are kept apart for diagnostics.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP error: {0}")]
    Status(reqwest::StatusCode),

    #[error("Malformed rate data: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch_rates(&self) -> Result<RateTable, FetchError>;
}
