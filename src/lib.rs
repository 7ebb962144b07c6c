//! Development proxy that answers API requests from local JSON fixtures.
//!
//! Requests whose path passes the allowlist are mapped to candidate fixture
//! files (`users-_id.get.json`, then `users-_id.json`); the first one that
//! exists and parses is returned with `X-Mock-By` / `X-Mock-File` headers.
//! Everything else is forwarded to the real backend untouched.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod mock;
pub mod observability;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use mock::Interceptor;
