//! Per-request interception.
//!
//! ```text
//! Start → GateChecked ─┬─ Bypassed ───────────────────────→ next()
//!                      └─ CandidatesBuilt ─┬─ Resolved ───→ fixture response
//!                                          └─ Unresolved ─→ next()
//! ```
//!
//! The only suspension point is fixture resolution. No state is carried
//! between requests; [`Interceptor`] is shared read-only behind an `Arc`.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::Instrument;

use crate::http::request::RequestIdExt;
use crate::http::response::fixture_response;
use crate::mock::{build_candidates, is_eligible, resolve, Configuration, ResolvedFixture};
use crate::observability::metrics;

/// Diagnostic log target, filterable independently of the rest of the proxy.
const LOG_TARGET: &str = "fixture_proxy::mock";

/// Outcome of running one request through gate, normalizer and resolver.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Gate said no; nothing else ran.
    Bypass,
    /// Eligible, but none of the candidates resolved.
    Delegate { candidates: Vec<String> },
    /// Answer with this fixture.
    Serve(ResolvedFixture),
}

impl Decision {
    pub fn outcome(&self) -> &'static str {
        match self {
            Decision::Bypass => "bypassed",
            Decision::Delegate { .. } => "delegated",
            Decision::Serve(_) => "served",
        }
    }
}

/// Orchestrates the interception flow for each request.
#[derive(Debug)]
pub struct Interceptor {
    config: Configuration,
    enabled: bool,
}

impl Interceptor {
    /// `enabled` is the global toggle, read once by the caller.
    pub fn new(config: Configuration, enabled: bool) -> Self {
        Self { config, enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Run gate, normalizer and resolver for one request.
    pub async fn decide(&self, method: &str, url: &str) -> Decision {
        if !is_eligible(url, &self.config, self.enabled) {
            if self.config.logging_enabled {
                tracing::info!(target: LOG_TARGET, %method, %url, "Not eligible for mocking");
            }
            return Decision::Bypass;
        }

        let candidates = build_candidates(url, method, &self.config);
        if self.config.logging_enabled {
            tracing::info!(
                target: LOG_TARGET,
                %method,
                %url,
                candidates = %candidates.join(", "),
                "Looking up fixture"
            );
        }

        match resolve(&candidates, &self.config.fixture_root).await {
            Some(fixture) => {
                if self.config.logging_enabled {
                    tracing::info!(
                        target: LOG_TARGET,
                        %method,
                        %url,
                        fixture = %fixture.used_path,
                        "Serving fixture"
                    );
                }
                Decision::Serve(fixture)
            }
            None => {
                if self.config.logging_enabled {
                    tracing::info!(
                        target: LOG_TARGET,
                        %method,
                        %url,
                        tried = %candidates.join(", "),
                        "No fixture found, forwarding to upstream"
                    );
                }
                Decision::Delegate { candidates }
            }
        }
    }
}

/// Axum middleware: answer from a fixture or hand the request to `next`.
///
/// Exactly one of the two happens per request.
pub async fn intercept(
    State(interceptor): State<Arc<Interceptor>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !interceptor.is_enabled() {
        return next.run(request).await;
    }

    let method = request.method().as_str().to_owned();
    let url = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());
    let span = tracing::debug_span!(target: LOG_TARGET, "intercept", request_id = %request.request_id());

    let decision = interceptor.decide(&method, &url).instrument(span).await;
    metrics::record_decision(decision.outcome());

    match decision {
        Decision::Serve(fixture) => match fixture_response(&fixture) {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(
                    target: LOG_TARGET,
                    %method,
                    %url,
                    fixture = %fixture.used_path,
                    error = %e,
                    "Could not build fixture response, forwarding to upstream"
                );
                next.run(request).await
            }
        },
        Decision::Bypass | Decision::Delegate { .. } => next.run(request).await,
    }
}
