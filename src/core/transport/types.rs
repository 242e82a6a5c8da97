//! Request, response and error types of the transport seam

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Outbound HTTP request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    /// JSON body
    pub body: Option<Value>,
    pub timeout: Duration,
}

impl HttpRequest {
    pub fn post(url: impl Into<String>, body: Value, timeout: Duration) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            headers: HeaderMap::new(),
            body: Some(body),
            timeout,
        }
    }

    /// Set a header, replacing any previous value
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Header value as text, if present and valid UTF-8
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Response of any status
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    /// Decoded JSON body, or the raw text as a JSON string
    pub body: Value,
}

impl HttpResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Broad classes of transport failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    InvalidRequest,
    Decode,
    Other,
}

/// Response material attached to a transport failure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorResponse {
    pub status: Option<u16>,
    pub body: Option<Value>,
    pub data: Option<Value>,
}

/// Failure to complete an HTTP exchange
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
    pub response: Option<ErrorResponse>,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            response: None,
        }
    }

    /// Timeout carrying a `{code, timeoutMs}` detail payload
    pub fn timeout(timeout: Duration) -> Self {
        let timeout_ms = timeout.as_millis() as u64;
        Self::new(
            TransportErrorKind::Timeout,
            format!("timeout of {}ms exceeded", timeout_ms),
        )
        .with_response(ErrorResponse {
            status: None,
            body: None,
            data: Some(serde_json::json!({
                "code": "ETIMEDOUT",
                "timeoutMs": timeout_ms,
            })),
        })
    }

    pub fn connect(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Connect, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::InvalidRequest, message)
    }

    pub fn with_response(mut self, response: ErrorResponse) -> Self {
        self.response = Some(response);
        self
    }

    pub fn is_timeout(&self) -> bool {
        self.kind == TransportErrorKind::Timeout
    }

    /// Structured detail: the decoded `body`, else `data`
    pub fn detail(&self) -> Option<Value> {
        let response = self.response.as_ref()?;
        response.body.clone().or_else(|| response.data.clone())
    }
}

/// Black-box request/response function
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T> HttpTransport for std::sync::Arc<T>
where
    T: HttpTransport + ?Sized,
{
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request).await
    }
}
