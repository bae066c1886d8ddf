//! Runs one of the hello functions as an AWS Lambda, or once locally from a payload file.
use handler_contract::{Event, Handler, ProcessEnv, Registry, RegistryError, Response};
use hello_functions::local::{self, Command};
use hello_functions::{registry, Config};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let config = Config::from_env(&ProcessEnv)?;
    let registry = registry(&config, Arc::new(ProcessEnv))?;

    match local::parse_args(std::env::args().skip(1))? {
        Command::Help => {
            print_help(&registry);
            Ok(())
        }
        Command::Invoke { handler, payload_file } => {
            let response = local::invoke_file(&registry, &handler, &payload_file, config.http_timeout).await?;
            println!("{response}");
            Ok(())
        }
        Command::Serve => serve(&registry, config.handler.as_deref()).await,
    }
}

/// Picks the handler named in `_HANDLER` and hands it to the Lambda runtime.
/// The runtime loop is the dispatcher: it fetches events one by one and reports errors.
async fn serve(registry: &Registry, handler_name: Option<&str>) -> Result<(), Error> {
    let name = match handler_name {
        Some(v) => v,
        None => {
            let names = registry.names().collect::<Vec<&str>>().join(", ");
            return Err(Error::from(format!("_HANDLER env var is not set. Use one of: {names}")));
        }
    };

    let handler = registry
        .get(name)
        .ok_or_else(|| RegistryError::Unknown(name.to_owned()))?;

    info!("Serving {name}");

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let handler = handler.clone();
        async move { invoke(handler.as_ref(), event).await }
    }))
    .await
}

async fn invoke(handler: &dyn Handler, event: LambdaEvent<Value>) -> Result<Response, Error> {
    let (payload, ctx) = event.into_parts();

    debug!("Event: {:?}", payload);
    debug!("Context: {:?}", ctx);

    // failures are logged and passed on to the runtime as-is
    let result = match Event::from_value(payload) {
        Ok(event) => handler.handle(&event, &ctx).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(v) => Ok(v),
        Err(e) => {
            error!("Request {} failed: {e}", ctx.request_id);
            Err(Error::from(e))
        }
    }
}

fn print_help(registry: &Registry) {
    println!("Hello functions for AWS Lambda.");
    println!();
    println!("As a lambda: set _HANDLER to the function name and run without arguments.");
    println!("Locally:     hello-functions [function] [payload_file], e.g. hello/world payload.json");
    println!();
    println!("Functions:");
    for name in registry.names() {
        println!("  {name}");
    }
}

/// Initializes the tracing from RUST_LOG env var if present or sets minimal logging:
/// - INFO for the functions and the contract
/// - ERROR for everything else
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("error,hello_functions=info,handler_contract=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false) // CloudWatch shows the color codes as text
        .without_time() // CloudWatch adds its own timestamps
        .with_target(false)
        .compact()
        .init();
}
