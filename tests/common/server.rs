//! Mock DocuProx API built on wiremock

use docuprox_batch::config::ApiConfig;
use docuprox_batch::{DocuProxNode, ReqwestTransport};
use serde_json::Value;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_API_KEY: &str = "dp_test_0123456789";
pub const PROCESS_PATH: &str = "/v1/process";

/// A running mock of the process endpoint
pub struct MockDocuProx {
    pub server: MockServer,
}

impl MockDocuProx {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.server.uri(), PROCESS_PATH)
    }

    pub fn api_config(&self, timeout: Duration) -> ApiConfig {
        ApiConfig {
            api_key: Some(TEST_API_KEY.to_string()),
            endpoint: self.endpoint(),
            timeout_ms: timeout.as_millis() as u64,
        }
    }

    /// Node talking to this server through the real reqwest transport
    pub fn node(&self, timeout: Duration) -> DocuProxNode<ReqwestTransport> {
        let transport = ReqwestTransport::new().expect("client builds");
        DocuProxNode::from_config(transport, &self.api_config(timeout)).expect("valid config")
    }

    /// Answer authenticated process calls with `status` and `body`
    pub async fn respond(&self, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path(PROCESS_PATH))
            .and(header("x-auth", TEST_API_KEY))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// JSON bodies of every request received so far
    pub async fn received_bodies(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|request| serde_json::from_slice(&request.body).ok())
            .collect()
    }
}
