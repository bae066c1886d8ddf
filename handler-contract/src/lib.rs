//! The contract every function handler satisfies to be invocable by a dispatcher.
//!
//! A handler receives an [`Event`] and a [`Context`] and returns a [`Response`] whose `body`
//! is the JSON encoding of whatever the handler assembled. Failures of helpers and
//! collaborators travel back to the dispatcher as [`HandlerError`] without being recovered.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod collaborators;
mod error;
mod event;
mod handler;
mod registry;
mod response;

pub use collaborators::{EnvSource, JsonFetcher, MapEnv, ProcessEnv, RouteTable, StaticRoute};
pub use error::{CollaboratorError, HandlerError, RegistryError};
pub use event::Event;
pub use handler::{handler_fn, FnHandler, Handler};
/// Invocation metadata is passed through as-is, so the runtime's own type is used.
pub use lambda_runtime::Context;
pub use registry::Registry;
pub use response::Response;

/// A captured invocation: the raw event plus the context it arrived with.
/// It replicates `lambda_runtime::LambdaEvent<Value>` because that one is not Ser/Deser.
#[derive(Deserialize, Debug, Serialize)]
pub struct InvocationPayload {
    pub event: Value,
    pub ctx: Context,
}
