//! Credential middleware for transports

use super::types::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use async_trait::async_trait;
use std::sync::Arc;

/// Something that can sign an outbound request
pub trait Credential: Send + Sync {
    /// Credential type name, e.g. `docuProxApi`
    fn name(&self) -> &'static str;

    /// Add authentication material to `request`
    fn authenticate(&self, request: &mut HttpRequest) -> Result<(), TransportError>;
}

/// Transport decorator that authenticates every request before sending it
#[derive(Clone)]
pub struct AuthenticatedTransport<T> {
    inner: T,
    credential: Arc<dyn Credential>,
}

impl<T> AuthenticatedTransport<T> {
    pub fn new(inner: T, credential: Arc<dyn Credential>) -> Self {
        Self { inner, credential }
    }
}

impl<T> std::fmt::Debug for AuthenticatedTransport<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedTransport")
            .field("credential", &self.credential.name())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<T> HttpTransport for AuthenticatedTransport<T>
where
    T: HttpTransport,
{
    async fn send(&self, mut request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.credential.authenticate(&mut request)?;
        self.inner.send(request).await
    }
}
