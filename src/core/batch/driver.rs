//! Sequential batch execution

use super::types::{BatchReport, BatchSummary};
use crate::core::context::BatchContext;
use crate::core::dispatcher::Dispatcher;
use crate::core::image_source::ImageSourceStrategy;
use crate::core::request::RequestBuilder;
use crate::core::resolver::ParameterResolver;
use crate::core::transport::HttpTransport;
use crate::core::types::{ItemOutput, Outcome};
use crate::utils::error::{ProcessingError, Result};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs the resolve → encode → build → dispatch pipeline for every item of a batch
#[derive(Debug, Clone)]
pub struct BatchDriver<T> {
    dispatcher: Dispatcher<T>,
}

impl<T> BatchDriver<T>
where
    T: HttpTransport,
{
    pub fn new(dispatcher: Dispatcher<T>) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &Dispatcher<T> {
        &self.dispatcher
    }

    /// Process every item of `ctx` in order
    ///
    /// With continue-on-failure the result holds exactly one record per item. Otherwise the first
    /// failing item aborts the run and no records are returned.
    pub async fn run<C>(&self, ctx: &C) -> Result<Vec<ItemOutput>>
    where
        C: BatchContext + ?Sized,
    {
        self.run_guarded(ctx, |_, _| Ok(())).await
    }

    /// Like [`run`](Self::run), with a per-item check evaluated before the pipeline
    ///
    /// A failing guard is handled like any other item failure.
    pub async fn run_guarded<C, G>(&self, ctx: &C, guard: G) -> Result<Vec<ItemOutput>>
    where
        C: BatchContext + ?Sized,
        G: Fn(&C, usize) -> std::result::Result<(), ProcessingError>,
    {
        let item_count = ctx.item_count();
        let continue_on_failure = ctx.continue_on_failure();
        info!(item_count, continue_on_failure, "Starting DocuProx batch");

        let mut outputs = Vec::with_capacity(item_count);
        for item_index in 0..item_count {
            let result = match guard(ctx, item_index) {
                Ok(()) => self.process_item(ctx, item_index).await,
                Err(e) => Err(e),
            };

            match result {
                Ok(outcome) => outputs.push(ItemOutput::new(item_index, outcome)),
                Err(e) if continue_on_failure => {
                    warn!(
                        item_index,
                        error_type = e.error_type(),
                        error = %e,
                        "Item failed, recording failure and continuing"
                    );
                    outputs.push(ItemOutput::new(item_index, Outcome::failure(&e)));
                }
                Err(e) => {
                    warn!(
                        item_index,
                        error_type = e.error_type(),
                        error = %e,
                        "Item failed, aborting batch"
                    );
                    return Err(ctx.abort_with_index(item_index, e));
                }
            }
        }

        let failed = outputs.iter().filter(|o| !o.is_success()).count();
        info!(
            item_count,
            succeeded = item_count - failed,
            failed,
            "DocuProx batch completed"
        );
        Ok(outputs)
    }

    /// Run the batch and summarize it
    pub async fn run_with_summary<C>(&self, ctx: &C) -> Result<BatchReport>
    where
        C: BatchContext + ?Sized,
    {
        let start = Instant::now();
        let outputs = self.run(ctx).await?;
        let summary = BatchSummary::from_outputs(&outputs, start.elapsed());
        Ok(BatchReport { outputs, summary })
    }

    /// Run the pipeline for one item
    pub async fn process_item<C>(
        &self,
        ctx: &C,
        item_index: usize,
    ) -> std::result::Result<Outcome, ProcessingError>
    where
        C: BatchContext + ?Sized,
    {
        let params = ParameterResolver::resolve(ctx, item_index)?;
        debug!(
            item_index,
            template_id = %params.template_id,
            image_source = %params.image_source,
            "Resolved item parameters"
        );

        let payload = ImageSourceStrategy::from_parameters(&params)
            .resolve(ctx, item_index)
            .await?;
        let envelope = RequestBuilder::build(&params.template_id, payload);
        let response = self.dispatcher.dispatch(&envelope).await?;

        Ok(Outcome::success(params.template_id, response))
    }
}
