use async_trait::async_trait;
use handler_contract::{Context, EnvSource, Event, Handler, HandlerError, Response};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

#[derive(Serialize)]
struct Greeting {
    message: String,
    /// null if GREETING is not set
    greeting: Option<String>,
    /// null if STATUS is not set
    status: Option<String>,
}

/// Greets `firstName` from the event and reports the GREETING and STATUS env vars.
pub struct HelloGreeting {
    env: Arc<dyn EnvSource>,
}

impl HelloGreeting {
    pub fn new(env: Arc<dyn EnvSource>) -> Self {
        Self { env }
    }
}

#[async_trait]
impl Handler for HelloGreeting {
    async fn handle(&self, event: &Event, ctx: &Context) -> Result<Response, HandlerError> {
        info!("hello/greeting invoked, request id: {}", ctx.request_id);

        // optional, but must be a string if present
        let first_name = event.field::<String>("firstName")?;

        Response::json(&Greeting {
            message: format!("Hi, {}!", first_name.as_deref().unwrap_or("world")),
            greeting: self.env.var("GREETING"),
            status: self.env.var("STATUS"),
        })
    }
}
