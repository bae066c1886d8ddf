use async_trait::async_trait;
use handler_contract::{Context, Event, Handler, HandlerError, JsonFetcher, Response, RouteTable};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info};

/// Always the same one.
pub fn i_choose_you() -> &'static str {
    "bulbasaur"
}

/// Looks up a pokemon through the API behind the route table and returns it
/// together with the event.
///
/// The event must carry a `payload` field. It is checked first so that a bad event fails
/// before any remote call is made.
pub struct HelloMom {
    routes: Arc<dyn RouteTable>,
    fetcher: Arc<dyn JsonFetcher>,
}

impl HelloMom {
    pub fn new(routes: Arc<dyn RouteTable>, fetcher: Arc<dyn JsonFetcher>) -> Self {
        Self { routes, fetcher }
    }
}

#[async_trait]
impl Handler for HelloMom {
    async fn handle(&self, event: &Event, ctx: &Context) -> Result<Response, HandlerError> {
        info!("hello/mom invoked, request id: {}", ctx.request_id);

        event.require("payload")?;

        let url = self.routes.base_url()?;
        let pokemon = i_choose_you();
        let response = self.fetcher.get_json(&format!("{url}/pokemon/{pokemon}")).await?;
        debug!("Got {pokemon} from {url}");

        Response::json(&json!({
            "hello": "mom",
            "pokemon": response,
            "event": event,
        }))
    }
}
