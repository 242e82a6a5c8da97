//! reqwest-backed transport

use super::types::{
    ErrorResponse, HttpRequest, HttpResponse, HttpTransport, TransportError, TransportErrorKind,
};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("docuprox-batch/", env!("CARGO_PKG_VERSION"));
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// Sends requests with a pooled [`reqwest::Client`]
///
/// Every status code is returned as an [`HttpResponse`]; only failures to complete the exchange
/// become [`TransportError`]s.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = ClientBuilder::new()
            .user_agent(USER_AGENT)
            .connect_timeout(CONNECT_TIMEOUT)
            .pool_idle_timeout(POOL_IDLE_TIMEOUT)
            .tcp_nodelay(true)
            .build()
            .map_err(|e| {
                TransportError::invalid_request(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let timeout = request.timeout;
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers)
            .timeout(timeout);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| map_reqwest_error(e, timeout))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| map_reqwest_error(e, timeout))?;

        debug!(status, bytes = text.len(), "Received HTTP response");
        Ok(HttpResponse::new(status, decode_body(&text)))
    }
}

/// JSON when possible, otherwise the raw text as a JSON string
pub(super) fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

fn map_reqwest_error(error: reqwest::Error, timeout: Duration) -> TransportError {
    map_failure(ReqwestFailure::from(&error), timeout)
}

/// The parts of a `reqwest::Error` the mapping looks at
#[derive(Debug, Clone, Default)]
pub(super) struct ReqwestFailure {
    pub connect: bool,
    pub timeout: bool,
    pub builder: bool,
    pub decode: bool,
    pub status: Option<u16>,
    pub message: String,
}

impl From<&reqwest::Error> for ReqwestFailure {
    fn from(error: &reqwest::Error) -> Self {
        Self {
            connect: error.is_connect(),
            timeout: error.is_timeout(),
            builder: error.is_builder(),
            decode: error.is_decode() || error.is_body(),
            status: error.status().map(|s| s.as_u16()),
            message: error.to_string(),
        }
    }
}

/// Connection failures are checked first: reqwest flags a connect timeout as a timeout too, but
/// it is bounded by [`CONNECT_TIMEOUT`], not the request timeout.
pub(super) fn map_failure(failure: ReqwestFailure, timeout: Duration) -> TransportError {
    if failure.connect {
        let message = if failure.timeout {
            format!(
                "connect timeout of {}ms exceeded",
                CONNECT_TIMEOUT.as_millis()
            )
        } else {
            failure.message
        };
        return TransportError::connect(message);
    }
    if failure.timeout {
        return TransportError::timeout(timeout);
    }

    let kind = if failure.builder {
        TransportErrorKind::InvalidRequest
    } else if failure.decode {
        TransportErrorKind::Decode
    } else {
        TransportErrorKind::Other
    };

    let mut mapped = TransportError::new(kind, failure.message);
    if let Some(status) = failure.status {
        mapped = mapped.with_response(ErrorResponse {
            status: Some(status),
            ..Default::default()
        });
    }
    mapped
}
