//! Gemini gateway adapter
//!
//! Implements the `LlmGateway` port against the Google Generative
//! Language HTTP API. Each invocation is a blocking network round-trip
//! from the orchestrator's point of view, so in-flight calls are capped
//! by a semaphore; callers beyond the cap queue at the permit boundary.

use super::types::{GenerateContentRequest, GenerateContentResponse};
use analyzer_application::ports::llm_gateway::{GatewayError, LlmGateway};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, info};

/// Generation settings matching the original analysis backend.
const TEMPERATURE: f32 = 0.2;
const MAX_OUTPUT_TOKENS: u32 = 1000;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_MAX_CONCURRENCY: usize = 4;
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for the Gemini gateway.
///
/// Built once at startup and handed to [`GeminiGateway::new`]; call
/// logic never reads the environment.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API credential (required; absence is a startup failure)
    pub api_key: String,
    /// Model name, e.g. "gemini-2.0-flash"
    pub model: String,
    /// Maximum concurrent in-flight API calls
    pub max_concurrency: usize,
    /// Per-request HTTP timeout
    pub request_timeout: Duration,
    /// API base URL (overridable for tests)
    pub base_url: String,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// HTTP adapter for the Gemini `generateContent` endpoint.
///
/// Performs no retries: a transport fault is surfaced on the first
/// failure and the orchestrator decides what to do with it. An aborted
/// caller does not cancel the HTTP request mid-flight; the response is
/// simply discarded when it arrives.
#[derive(Debug)]
pub struct GeminiGateway {
    client: reqwest::Client,
    semaphore: Arc<Semaphore>,
    config: GeminiConfig,
}

impl GeminiGateway {
    pub fn new(config: GeminiConfig) -> Result<Self, GatewayError> {
        if config.api_key.is_empty() {
            return Err(GatewayError::AuthFailed("API key is empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        info!(
            model = %config.model,
            max_concurrency = config.max_concurrency,
            "Gemini gateway initialized"
        );

        Ok(Self {
            client,
            semaphore: Arc::new(Semaphore::new(config.max_concurrency)),
            config,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }
}

#[async_trait]
impl LlmGateway for GeminiGateway {
    async fn invoke(&self, prompt: &str) -> Result<String, GatewayError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|e| GatewayError::Other(format!("concurrency limiter closed: {e}")))?;

        debug!(model = %self.config.model, "dispatching generateContent request");

        let request = GenerateContentRequest::single_turn(prompt, TEMPERATURE, MAX_OUTPUT_TOKENS);

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    GatewayError::ConnectionError(e.to_string())
                } else {
                    GatewayError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, &body));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::RequestFailed(format!("invalid response body: {e}")))?;

        parsed
            .text()
            .ok_or_else(|| GatewayError::RequestFailed("response contained no text".to_string()))
    }
}

/// Map a non-success HTTP status to the gateway error taxonomy.
fn classify_status(status: StatusCode, body: &str) -> GatewayError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            GatewayError::AuthFailed(format!("{status}: {body}"))
        }
        StatusCode::TOO_MANY_REQUESTS => GatewayError::QuotaExceeded(format!("{status}: {body}")),
        _ => GatewayError::RequestFailed(format!("{status}: {body}")),
    }
}
