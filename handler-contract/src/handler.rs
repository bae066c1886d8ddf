use crate::{Context, Event, HandlerError, Response};
use async_trait::async_trait;

/// A unit of request-processing logic, invoked once per incoming event.
///
/// `event` and `ctx` are borrowed immutably and dropped by the dispatcher after the call.
/// Implementations keep no state between invocations other than read-only collaborators.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, event: &Event, ctx: &Context) -> Result<Response, HandlerError>;
}

/// Wraps a plain function so it can be registered as a [`Handler`].
/// Created with [`handler_fn`].
#[derive(Clone, Copy)]
pub struct FnHandler<F> {
    f: F,
}

/// Converts a synchronous function into a [`Handler`], similar to `lambda_runtime::service_fn`.
pub fn handler_fn<F>(f: F) -> FnHandler<F>
where
    F: Fn(&Event, &Context) -> Result<Response, HandlerError> + Send + Sync,
{
    FnHandler { f }
}

#[async_trait]
impl<F> Handler for FnHandler<F>
where
    F: Fn(&Event, &Context) -> Result<Response, HandlerError> + Send + Sync,
{
    async fn handle(&self, event: &Event, ctx: &Context) -> Result<Response, HandlerError> {
        (self.f)(event, ctx)
    }
}
