//! Outbound transport for dispatch requests.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use thiserror::Error;

use relay_core::config::DispatchConfig;
use relay_core::error::AppError;
use relay_entity::application::Application;

use super::payload::DispatchPayload;

/// Where one dispatch request goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchTarget {
    /// Full endpoint URL.
    pub url: String,
    /// Bearer credential, if the application has one.
    pub bearer_token: Option<String>,
}

impl From<&Application> for DispatchTarget {
    fn from(app: &Application) -> Self {
        Self {
            url: app.dispatch_url(),
            bearer_token: app.bearer_token().map(str::to_string),
        }
    }
}

/// A response received from the target, whatever its status.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Body as JSON when it parses, else as a string.
    pub body: Value,
}

/// The request never produced a response.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Sends a dispatch payload to one target.
#[async_trait]
pub trait DispatchTransport: Send + Sync + std::fmt::Debug {
    /// Posts the payload. Must give up after a bounded time.
    async fn post(
        &self,
        target: &DispatchTarget,
        payload: &DispatchPayload,
    ) -> Result<TransportResponse, TransportError>;
}

/// HTTP transport backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    timeout_seconds: u64,
}

impl HttpTransport {
    /// Build the client from dispatch configuration.
    pub fn new(config: &DispatchConfig) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        let name = HeaderName::from_bytes(config.source_header.as_bytes()).map_err(|e| {
            AppError::configuration(format!("Invalid dispatch source header: {e}"))
        })?;
        headers.insert(name, HeaderValue::from_static("true"));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            timeout_seconds: config.timeout_seconds,
        })
    }
}

#[async_trait]
impl DispatchTransport for HttpTransport {
    async fn post(
        &self,
        target: &DispatchTarget,
        payload: &DispatchPayload,
    ) -> Result<TransportResponse, TransportError> {
        let mut request = self.client.post(&target.url).json(payload);
        if let Some(token) = &target.bearer_token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| TransportError(format!("Invalid API key: {e}")))?;
            request = request.header(AUTHORIZATION, value);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError(format!("Request timed out after {}s", self.timeout_seconds))
            } else {
                TransportError(format!("Request failed: {e}"))
            }
        })?;

        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        Ok(TransportResponse { status, body })
    }
}
