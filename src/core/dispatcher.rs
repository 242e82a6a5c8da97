//! Authenticated dispatch of request envelopes to the DocuProx API

use super::transport::{AuthenticatedTransport, Credential, HttpRequest, HttpTransport};
use super::types::RequestEnvelope;
use crate::utils::error::ProcessingError;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderValue};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Process endpoint of the DocuProx API
pub const DOCUPROX_PROCESS_URL: &str = "https://api.docuprox.com/v1/process";

/// Request timeout for a single dispatch
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(60_000);

/// Issues one `POST` per envelope through an authenticating transport
#[derive(Debug, Clone)]
pub struct Dispatcher<T> {
    transport: T,
    endpoint: String,
    timeout: Duration,
}

impl<T> Dispatcher<AuthenticatedTransport<T>>
where
    T: HttpTransport,
{
    /// Wrap a raw transport with `credential` and dispatch through it
    pub fn authenticated(transport: T, credential: Arc<dyn Credential>) -> Self {
        Self::new(AuthenticatedTransport::new(transport, credential))
    }
}

impl<T> Dispatcher<T>
where
    T: HttpTransport,
{
    /// The transport is expected to add authentication itself
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            endpoint: DOCUPROX_PROCESS_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Point at another endpoint, e.g. a staging deployment
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build the outbound request for an envelope
    pub fn build_request(&self, envelope: &RequestEnvelope) -> Result<HttpRequest, ProcessingError> {
        let body = serde_json::to_value(envelope).map_err(|e| {
            ProcessingError::api_call_failed(format!("Failed to serialize request: {}", e), None)
        })?;

        Ok(HttpRequest::post(&self.endpoint, body, self.timeout)
            .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .with_header(ACCEPT, HeaderValue::from_static("application/json")))
    }

    /// Submit an envelope and return the decoded response body
    pub async fn dispatch(&self, envelope: &RequestEnvelope) -> Result<Value, ProcessingError> {
        let request = self.build_request(envelope)?;
        debug!(
            endpoint = %self.endpoint,
            template_id = %envelope.template_id,
            image_len = envelope.actual_image.len(),
            "Dispatching document to DocuProx"
        );

        let start = Instant::now();
        let response = self.transport.send(request).await.map_err(|e| {
            warn!(error = %e, timeout = e.is_timeout(), "DocuProx request failed");
            let detail = e.detail();
            ProcessingError::api_call_failed(e.message, detail)
        })?;

        debug!(
            status = response.status,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "DocuProx responded"
        );

        if !response.is_success() {
            let details = match response.body {
                Value::Null => None,
                body => Some(body),
            };
            return Err(ProcessingError::api_call_failed(
                format!("Request failed with status code {}", response.status),
                details,
            ));
        }

        Ok(response.body)
    }
}
