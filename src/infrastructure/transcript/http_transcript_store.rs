use async_trait::async_trait;
use reqwest::Client;

use crate::application::ports::{TranscriptStore, TranscriptStoreError};
use crate::domain::TranscriptLine;

/// Fetches transcript artifacts over HTTP and decodes them as
/// line-delimited JSON.
pub struct HttpTranscriptStore {
    client: Client,
}

impl HttpTranscriptStore {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for HttpTranscriptStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranscriptStore for HttpTranscriptStore {
    async fn fetch_lines(&self, url: &str) -> Result<Vec<TranscriptLine>, TranscriptStoreError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TranscriptStoreError::FetchFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TranscriptStoreError::FetchFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| TranscriptStoreError::FetchFailed(e.to_string()))?;

        Ok(parse_jsonl(&text))
    }
}

/// Each line is parsed independently; a malformed line is skipped rather
/// than discarding the rest of the artifact.
pub fn parse_jsonl(text: &str) -> Vec<TranscriptLine> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match serde_json::from_str(line) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed transcript line");
                None
            }
        })
        .collect()
}
