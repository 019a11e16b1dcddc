use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    arrange::{arrange, arrange_by_field},
    error::LookupError,
    protocol::{LookupResult, WordQuery, WordRecord},
};
use tracing::{debug, info, warn};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.datamuse.com";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait WordLookup: Send + Sync {
    /// Fetches raw records for `query`, in the order the service returned them.
    async fn lookup(&self, query: &WordQuery) -> Result<Vec<WordRecord>, LookupError>;

    /// Fetches and arranges records for display.
    ///
    /// `group_field` overrides the mode's default arrangement with grouping by
    /// a named [`WordRecord`] field.
    async fn find(
        &self,
        query: WordQuery,
        group_field: Option<&str>,
    ) -> Result<LookupResult, LookupError> {
        let records = self.lookup(&query).await?;
        Ok(match group_field {
            Some(field) => arrange_by_field(query, records, field),
            None => arrange(query, records),
        })
    }
}

#[derive(Clone)]
pub struct WordLookupClient {
    http: Client,
    base_url: String,
}

impl WordLookupClient {
    pub fn new(base_url: &str) -> Result<Self, LookupError> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, LookupError> {
        let base_url = normalize_base_url(base_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| LookupError::Transport(err.to_string()))?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn words_url(&self) -> String {
        format!("{}/words", self.base_url)
    }
}

#[async_trait]
impl WordLookup for WordLookupClient {
    async fn lookup(&self, query: &WordQuery) -> Result<Vec<WordRecord>, LookupError> {
        debug!(mode = %query.mode, word = %query.word, "word lookup request");
        let res = self
            .http
            .get(self.words_url())
            .query(&query.params())
            .send()
            .await
            .map_err(|err| LookupError::Transport(err.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            warn!(%status, word = %query.word, "word service rejected lookup");
            return Err(LookupError::Status {
                status: status.as_u16(),
            });
        }

        let body = res
            .text()
            .await
            .map_err(|err| LookupError::Transport(err.to_string()))?;
        let records: Vec<WordRecord> =
            serde_json::from_str(&body).map_err(|err| LookupError::Decode(err.to_string()))?;

        info!(
            mode = %query.mode,
            word = %query.word,
            count = records.len(),
            "word lookup finished"
        );
        Ok(records)
    }
}

/// Trims whitespace and trailing slashes and checks the result is an http(s) URL.
pub fn normalize_base_url(raw: &str) -> Result<String, LookupError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = |reason: String| LookupError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    if trimmed.is_empty() {
        return Err(invalid("url is empty".to_string()));
    }

    let parsed = Url::parse(trimmed).map_err(|err| invalid(err.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
