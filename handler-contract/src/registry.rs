use crate::{Context, Event, Handler, HandlerError, RegistryError, Response};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Named handlers, built once at process start and passed to whatever dispatches them.
#[derive(Clone, Default)]
pub struct Registry {
    handlers: BTreeMap<String, Arc<dyn Handler>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a handler under `name`. Names are unique: a second registration is rejected
    /// rather than silently replacing the first one.
    pub fn register<H>(&mut self, name: impl Into<String>, handler: H) -> Result<&mut Self, RegistryError>
    where
        H: Handler + 'static,
    {
        let name = name.into();
        if self.handlers.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }

        debug!("Registered handler {name}");
        self.handlers.insert(name, Arc::new(handler));
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Handler>> {
        self.handlers.get(name).cloned()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Looks up the handler and invokes it once.
    /// The handler's result, success or failure, is returned untouched.
    pub async fn invoke(&self, name: &str, event: &Event, ctx: &Context) -> Result<Response, HandlerError> {
        let handler = self
            .handlers
            .get(name)
            .ok_or_else(|| RegistryError::Unknown(name.to_owned()))?;

        debug!("Invoking {name}, request id: {}", ctx.request_id);
        handler.handle(event, ctx).await
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}
