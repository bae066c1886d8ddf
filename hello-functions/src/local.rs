//! Running a single invocation from a payload file, without the Lambda service.

use handler_contract::{Context, Event, HandlerError, InvocationPayload, Registry};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

/// Stands in for the ARN of a deployed function.
pub const LOCAL_FUNCTION_ARN: &str = "from-local-payload";

const LOCAL_TRACE_ID: &str = "Root=0-00000000-000000000000000000000000;Parent=0000000000000000;Sampled=0;Lineage=00000000:0";

#[derive(Debug, Error)]
pub enum LocalError {
    #[error("Invalid arguments: {0}. Run with --help for usage.")]
    Usage(String),

    #[error("Failed to read payload from {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Payload in {path:?} is not valid JSON: {source}")]
    Payload {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Handler(#[from] HandlerError),
}

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print usage and exit
    Help,
    /// Invoke one handler once with the payload from the file
    Invoke { handler: String, payload_file: PathBuf },
    /// No arguments: run as a Lambda function
    Serve,
}

/// Parses the command line arguments, excluding the executable name.
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Command, LocalError> {
    let args = args.into_iter().collect::<Vec<String>>();

    match args.as_slice() {
        [] => Ok(Command::Serve),
        [flag, ..] if flag == "--help" || flag == "-h" => Ok(Command::Help),
        [handler, payload_file] => Ok(Command::Invoke {
            handler: handler.clone(),
            payload_file: PathBuf::from(payload_file),
        }),
        [_] => Err(LocalError::Usage("missing payload file name".to_string())),
        _ => Err(LocalError::Usage(format!("expected 2 arguments, got {}", args.len()))),
    }
}

/// Reads the payload file.
///
/// A file captured from a real invocation, i.e. `{"event": {..}, "ctx": {..}}`, is replayed
/// with its own context. Anything else is taken to be the event itself.
pub fn read_payload(path: &Path) -> Result<(Event, Option<Context>), LocalError> {
    let payload = std::fs::read_to_string(path).map_err(|source| LocalError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let value = serde_json::from_str::<Value>(&payload).map_err(|source| LocalError::Payload {
        path: path.to_path_buf(),
        source,
    })?;

    if let Ok(captured) = serde_json::from_value::<InvocationPayload>(value.clone()) {
        debug!("Replaying captured invocation {}", captured.ctx.request_id);
        return Ok((Event::from_value(captured.event)?, Some(captured.ctx)));
    }

    Ok((Event::from_value(value)?, None))
}

/// A context for a local run: a fresh request ID and a deadline `timeout` from now.
pub fn local_context(timeout: Duration) -> Context {
    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
    let deadline = u64::try_from((now + timeout).as_millis()).unwrap_or(u64::MAX);

    let mut ctx = Context::default();
    ctx.request_id = Uuid::new_v4().to_string();
    ctx.deadline = deadline;
    ctx.invoked_function_arn = LOCAL_FUNCTION_ARN.to_string();
    ctx.xray_trace_id = Some(LOCAL_TRACE_ID.to_string());
    ctx
}

/// Invokes `handler` once with the payload from `payload_file` and returns the response
/// as pretty-printed JSON.
pub async fn invoke_file(
    registry: &Registry,
    handler: &str,
    payload_file: &Path,
    timeout: Duration,
) -> Result<String, LocalError> {
    let (event, ctx) = read_payload(payload_file)?;
    let ctx = ctx.unwrap_or_else(|| local_context(timeout));

    info!("Invoking {handler} with payload from {payload_file:?}, request id: {}", ctx.request_id);

    let response = registry.invoke(handler, &event, &ctx).await?;
    Ok(serde_json::to_string_pretty(&response).map_err(HandlerError::from)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(parse_args(args(&[])).unwrap(), Command::Serve);
        assert_eq!(parse_args(args(&["--help"])).unwrap(), Command::Help);
        assert_eq!(parse_args(args(&["-h", "extra"])).unwrap(), Command::Help);
        assert_eq!(
            parse_args(args(&["hello/world", "payload.json"])).unwrap(),
            Command::Invoke {
                handler: "hello/world".to_string(),
                payload_file: PathBuf::from("payload.json"),
            }
        );
        assert!(matches!(parse_args(args(&["hello/world"])), Err(LocalError::Usage(_))));
        assert!(matches!(parse_args(args(&["a", "b", "c"])), Err(LocalError::Usage(_))));
    }

    #[test]
    fn test_local_context() {
        let before = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_millis() as u64;
        let ctx = local_context(Duration::from_secs(10));

        assert!(Uuid::parse_str(&ctx.request_id).is_ok());
        assert!(ctx.deadline >= before + 10_000);
        assert_eq!(ctx.invoked_function_arn, LOCAL_FUNCTION_ARN);

        // every local run gets its own request id
        assert_ne!(ctx.request_id, local_context(Duration::from_secs(10)).request_id);
    }
}
