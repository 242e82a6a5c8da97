//! The DocuProx node: operation guard plus the core batch pipeline

use super::credentials::DocuProxApiCredential;
use super::description::{NodeDescription, Operation, node_description};
use crate::config::ApiConfig;
use crate::core::batch::{BatchDriver, BatchReport, BatchSummary};
use crate::core::context::BatchContext;
use crate::core::dispatcher::Dispatcher;
use crate::core::transport::{AuthenticatedTransport, HttpTransport};
use crate::core::types::ItemOutput;
use crate::utils::error::{ConfigError, Result};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Executes batches the way a workflow host runs the DocuProx node
#[derive(Debug, Clone)]
pub struct DocuProxNode<T> {
    driver: BatchDriver<AuthenticatedTransport<T>>,
}

impl<T> DocuProxNode<T>
where
    T: HttpTransport,
{
    pub fn new(transport: T, credential: DocuProxApiCredential) -> Self {
        Self::with_dispatcher(Dispatcher::authenticated(transport, Arc::new(credential)))
    }

    /// Build a node from API settings; fails when no API key is configured
    pub fn from_config(transport: T, config: &ApiConfig) -> std::result::Result<Self, ConfigError> {
        let credential =
            DocuProxApiCredential::new(config.api_key.clone().unwrap_or_default())?;
        let dispatcher = Dispatcher::authenticated(transport, Arc::new(credential))
            .with_endpoint(config.endpoint.clone())
            .with_timeout(config.timeout());

        info!(endpoint = %config.endpoint, timeout_ms = config.timeout_ms, "DocuProx node configured");
        Ok(Self::with_dispatcher(dispatcher))
    }

    pub fn with_dispatcher(dispatcher: Dispatcher<AuthenticatedTransport<T>>) -> Self {
        Self {
            driver: BatchDriver::new(dispatcher),
        }
    }

    pub fn description(&self) -> &'static NodeDescription {
        node_description()
    }

    pub fn driver(&self) -> &BatchDriver<AuthenticatedTransport<T>> {
        &self.driver
    }

    /// Run every item of `ctx`
    ///
    /// Each item's resource and operation are checked before its pipeline runs.
    pub async fn execute<C>(&self, ctx: &C) -> Result<Vec<ItemOutput>>
    where
        C: BatchContext + ?Sized,
    {
        self.driver
            .run_guarded(ctx, |ctx, item_index| {
                Operation::resolve(ctx, item_index).map(|_| ())
            })
            .await
    }

    pub async fn execute_with_summary<C>(&self, ctx: &C) -> Result<BatchReport>
    where
        C: BatchContext + ?Sized,
    {
        let start = Instant::now();
        let outputs = self.execute(ctx).await?;
        let summary = BatchSummary::from_outputs(&outputs, start.elapsed());
        Ok(BatchReport { outputs, summary })
    }
}
