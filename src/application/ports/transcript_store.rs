use async_trait::async_trait;

use crate::domain::TranscriptLine;

#[derive(Debug, thiserror::Error)]
pub enum TranscriptStoreError {
    #[error("fetch failed: {0}")]
    FetchFailed(String),
    #[error("malformed artifact: {0}")]
    Malformed(String),
}

/// Read side of the provider's transcript artifact store: line-delimited
/// JSON reachable over HTTP.
#[async_trait]
pub trait TranscriptStore: Send + Sync {
    async fn fetch_lines(&self, url: &str) -> Result<Vec<TranscriptLine>, TranscriptStoreError>;
}
