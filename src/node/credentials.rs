//! `docuProxApi` credential type

use crate::core::transport::{Credential, HttpRequest, TransportError};
use crate::utils::error::ConfigError;
use reqwest::header::{HeaderName, HeaderValue};
use serde_json::{Value, json};

/// Header carrying the API key
pub const AUTH_HEADER: &str = "x-auth";

/// API key credential, injected as the `x-auth` header
#[derive(Clone)]
pub struct DocuProxApiCredential {
    api_key: String,
}

impl DocuProxApiCredential {
    pub const NAME: &'static str = "docuProxApi";
    pub const DISPLAY_NAME: &'static str = "DocuProx API";
    pub const DOCUMENTATION_URL: &'static str = "https://docuprox.com/docs";

    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::Missing("api.api_key"));
        }
        Ok(Self { api_key })
    }

    /// Credential type schema as exposed to hosts
    pub fn describe() -> Value {
        json!({
            "name": Self::NAME,
            "displayName": Self::DISPLAY_NAME,
            "documentationUrl": Self::DOCUMENTATION_URL,
            "properties": [{
                "displayName": "API Key",
                "name": "apiKey",
                "type": "string",
                "typeOptions": {"password": true},
                "default": "",
                "required": true,
                "description": "Your DocuProx API key"
            }],
            "authenticate": {
                "type": "generic",
                "properties": {"headers": {"x-auth": "={{$credentials.apiKey}}"}}
            }
        })
    }
}

impl std::fmt::Debug for DocuProxApiCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocuProxApiCredential")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl Credential for DocuProxApiCredential {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn authenticate(&self, request: &mut HttpRequest) -> Result<(), TransportError> {
        let mut value = HeaderValue::from_str(&self.api_key).map_err(|_| {
            TransportError::invalid_request("API key contains characters not allowed in a header")
        })?;
        value.set_sensitive(true);
        request
            .headers
            .insert(HeaderName::from_static(AUTH_HEADER), value);
        Ok(())
    }
}
