//! Interfaces of the systems a handler calls but does not implement.
//!
//! Handlers receive these as trait objects so tests can inject fixed values
//! without touching the network or the real process environment.

use crate::CollaboratorError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;

/// Returns the base URL of the API the handler talks to.
/// Either the whole URL comes back or the call fails, there are no partial results.
pub trait RouteTable: Send + Sync {
    fn base_url(&self) -> Result<String, CollaboratorError>;
}

/// Fetches a URL and decodes the body as JSON.
/// Network errors, non-success statuses and undecodable bodies are all failures.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value, CollaboratorError>;
}

/// Read-only view of environment variables. An absent key is `None`, never an error.
pub trait EnvSource: Send + Sync {
    fn var(&self, key: &str) -> Option<String>;
}

/// A route table with a single base URL fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticRoute {
    base_url: String,
}

impl StaticRoute {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl RouteTable for StaticRoute {
    fn base_url(&self) -> Result<String, CollaboratorError> {
        if self.base_url.trim().is_empty() {
            return Err(CollaboratorError::Route("base URL is empty".to_string()));
        }
        // callers append paths starting with /
        Ok(self.base_url.trim_end_matches('/').to_owned())
    }
}

/// The environment of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        // non-UTF-8 values are treated as missing
        std::env::var(key).ok()
    }
}

/// A fixed set of variables, mainly for tests and local runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv {
    vars: BTreeMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl EnvSource for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}
