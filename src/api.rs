use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::PollError;

/// Query parameter carrying the cursor.
pub const CURSOR_PARAM: &str = "from_date";

/// Source of homework status batches.
#[async_trait]
pub trait StatusApi: Send + Sync {
    /// Fetch every status change since `cursor`. The body is returned as
    /// decoded JSON without any schema checks.
    async fn fetch(&self, cursor: i64) -> Result<Value, PollError>;
}

#[derive(Clone)]
pub struct PracticumClient {
    http: Client,
    endpoint: Url,
    token: String,
}

impl fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl PracticumClient {
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let endpoint =
            Url::parse(&cfg.practicum.endpoint).context("invalid practicum.endpoint URL")?;
        Self::with_endpoint(
            cfg.practicum.token.clone(),
            endpoint,
            Duration::from_secs(cfg.practicum.connect_timeout_secs),
            Duration::from_secs(cfg.practicum.request_timeout_secs),
        )
    }

    pub fn with_endpoint(
        token: String,
        endpoint: Url,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .user_agent("homework-watchbot/0.1")
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            endpoint,
            token,
        })
    }

    pub fn build_request(&self, cursor: i64) -> Result<reqwest::Request, PollError> {
        self.http
            .get(self.endpoint.clone())
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[(CURSOR_PARAM, cursor)])
            .build()
            .map_err(PollError::transport)
    }
}

#[async_trait]
impl StatusApi for PracticumClient {
    async fn fetch(&self, cursor: i64) -> Result<Value, PollError> {
        let request = self.build_request(cursor)?;
        debug!(url=%request.url(), cursor, "requesting homework statuses");
        let res = self
            .http
            .execute(request)
            .await
            .map_err(PollError::transport)?;

        let status = res.status();
        if status != StatusCode::OK {
            let body = res.text().await.unwrap_or_default();
            warn!(%status, %body, "status API returned an error");
            return Err(PollError::ApiStatus {
                actual: status.as_u16(),
                expected: StatusCode::OK.as_u16(),
            });
        }

        let body = res.text().await.map_err(PollError::transport)?;
        serde_json::from_str(&body).map_err(PollError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> PracticumClient {
        PracticumClient::with_endpoint(
            "secret".into(),
            Url::parse("https://example.test/api/user_api/homework_statuses/").unwrap(),
            Duration::from_secs(1),
            Duration::from_secs(1),
        )
        .unwrap()
    }

    #[test]
    fn build_request_sets_auth_and_cursor() {
        let request = client().build_request(1_700_000_000).unwrap();
        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(request.url().path(), "/api/user_api/homework_statuses/");
        assert_eq!(request.url().query(), Some("from_date=1700000000"));
        assert_eq!(
            request
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .unwrap(),
            "OAuth secret"
        );
    }

    #[test]
    fn debug_hides_token() {
        let rendered = format!("{:?}", client());
        assert!(!rendered.contains("secret"));
    }
}
