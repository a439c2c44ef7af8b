use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

use crate::config::ServiceConfig;
use crate::error::{Result, SummaryError};
use crate::models::{ServiceErrorBody, SummariseRequest, SummariseResponse, SummaryData};

/// Characters per token used by the service's length estimate.
pub const TOKEN_CHARACTER_COUNT: usize = 4;
/// Longest document (in approximate tokens) the service accepts.
pub const MAX_PROMPT_TOKENS: usize = 1500;

pub fn approximate_tokens(document: &str) -> usize {
    document.chars().count() / TOKEN_CHARACTER_COUNT
}

/// Anything that can turn a document into summary sentences and paragraphs
/// with embeddings.
#[async_trait]
pub trait SummarySource: Send + Sync + 'static {
    async fn fetch(&self, document: &str) -> Result<SummaryData>;
}

/// HTTP client for the summarisation service.
pub struct SummariserApi {
    client: Client,
    url: String,
}

impl SummariserApi {
    pub fn new(config: &ServiceConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .default_headers(Self::default_headers(&config.user_agent)?)
            .timeout(config.timeout())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            url: config.url(),
        })
    }

    pub fn new_with_endpoint(url: String) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }

    fn default_headers(user_agent: &str) -> anyhow::Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent).context("invalid user agent")?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    fn service_error(status: StatusCode, body: &str) -> SummaryError {
        let detail = match serde_json::from_str::<ServiceErrorBody>(body) {
            Ok(parsed) => parsed.detail,
            Err(_) if !body.trim().is_empty() => body.trim().to_string(),
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };

        SummaryError::Service {
            status: status.as_u16(),
            detail,
        }
    }
}

#[async_trait]
impl SummarySource for SummariserApi {
    #[instrument(name = "fetch_summary", skip(self, document), fields(url = %self.url, document_len = document.len()))]
    async fn fetch(&self, document: &str) -> Result<SummaryData> {
        let response = self
            .client
            .post(&self.url)
            .json(&SummariseRequest { document })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let err = Self::service_error(status, &body);
            warn!(status = %status, error = %err, "Summarisation request failed");
            return Err(err);
        }

        let decoded: SummariseResponse = serde_json::from_str(&body)?;
        let data = SummaryData::try_from(decoded)?;
        debug!(
            sentences = data.sentences.len(),
            paragraphs = data.paragraphs.len(),
            dimension = ?data.dimension(),
            "Decoded summarisation data"
        );

        Ok(data)
    }
}
