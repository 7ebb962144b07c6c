//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the forwarding handler
//! - Install the fixture interceptor in front of it
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener and shut down gracefully

use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, middleware::from_fn_with_state, routing::any, Router};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::http::forward::{forward, Upstream};
use crate::http::request::MakeRequestUuid;
use crate::lifecycle::signals::shutdown_signal;
use crate::mock::{intercept, Interceptor};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid upstream address: {0}")]
    InvalidUpstream(#[from] axum::http::uri::InvalidUri),
}

/// HTTP server for the fixture proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and interceptor.
    pub fn new(config: ProxyConfig, interceptor: Arc<Interceptor>) -> Result<Self, ServerError> {
        let upstream = Upstream::new(config.upstream.address.as_deref())?;
        let router = Self::build_router(&config, upstream, interceptor);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, upstream: Upstream, interceptor: Arc<Interceptor>) -> Router {
        Router::new()
            .route("/{*path}", any(forward))
            .route("/", any(forward))
            .with_state(upstream)
            .layer(from_fn_with_state(interceptor, intercept))
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(config.timeouts.request_secs),
            ))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The assembled router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until Ctrl+C or a message on `shutdown`.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = ?self.config.upstream.address,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}
