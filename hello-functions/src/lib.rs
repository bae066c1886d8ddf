//! Demo functions built on `handler_contract`: `hello/world`, `hello/mom` and `hello/greeting`.

pub mod config;
pub mod handlers;
pub mod http;
pub mod local;

pub use config::Config;
pub use handlers::registry;
