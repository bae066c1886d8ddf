use handler_contract::{Context, Event, HandlerError, Response};
use serde_json::json;
use tracing::info;

/// Echoes the event back in the body for API Gateway.
/// Reads no fields, so any JSON object is a valid event.
pub fn hello_world(event: &Event, ctx: &Context) -> Result<Response, HandlerError> {
    info!("hello/world invoked, request id: {}", ctx.request_id);

    Response::json(&json!({ "received": event }))
}
