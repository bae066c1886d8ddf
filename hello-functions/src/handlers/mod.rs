use crate::config::Config;
use crate::http::HttpJsonClient;
use handler_contract::{handler_fn, EnvSource, HandlerError, Registry, StaticRoute};
use std::sync::Arc;

pub mod greeting;
pub mod hello_mom;
pub mod hello_world;

pub use greeting::HelloGreeting;
pub use hello_mom::{i_choose_you, HelloMom};
pub use hello_world::hello_world;

pub const HELLO_WORLD: &str = "hello/world";
pub const HELLO_MOM: &str = "hello/mom";
pub const HELLO_GREETING: &str = "hello/greeting";

/// Builds the registry with all functions of this crate.
/// Called once at startup. Collaborators are shared by all invocations and are read-only.
pub fn registry(config: &Config, env: Arc<dyn EnvSource>) -> Result<Registry, HandlerError> {
    let routes = Arc::new(StaticRoute::new(config.api_base_url.clone()));
    let fetcher = Arc::new(HttpJsonClient::new(config.http_timeout)?);

    let mut registry = Registry::new();
    registry
        .register(HELLO_WORLD, handler_fn(hello_world))?
        .register(HELLO_MOM, HelloMom::new(routes, fetcher))?
        .register(HELLO_GREETING, HelloGreeting::new(env))?;

    Ok(registry)
}
