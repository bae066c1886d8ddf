use async_trait::async_trait;
use handler_contract::{CollaboratorError, JsonFetcher};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// [`JsonFetcher`] over a shared `reqwest` client.
/// No retries: a failed request is reported as-is.
#[derive(Debug, Clone)]
pub struct HttpJsonClient {
    client: reqwest::Client,
}

impl HttpJsonClient {
    pub fn new(timeout: Duration) -> Result<Self, CollaboratorError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CollaboratorError::Transport {
                url: String::new(),
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl JsonFetcher for HttpJsonClient {
    async fn get_json(&self, url: &str) -> Result<Value, CollaboratorError> {
        debug!("GET {url}");

        let resp = match self.client.get(url).send().await {
            Ok(v) => v,
            Err(e) => {
                return Err(CollaboratorError::Transport {
                    url: url.to_owned(),
                    message: e.to_string(),
                })
            }
        };

        let status = resp.status();
        debug!("GET {url}: {status}");
        if !status.is_success() {
            return Err(CollaboratorError::Status {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }

        // read the body first so that transport and decoding errors are told apart
        let body = match resp.bytes().await {
            Ok(v) => v,
            Err(e) => {
                return Err(CollaboratorError::Transport {
                    url: url.to_owned(),
                    message: e.to_string(),
                })
            }
        };

        serde_json::from_slice(&body).map_err(|e| CollaboratorError::Decode {
            url: url.to_owned(),
            message: e.to_string(),
        })
    }
}
