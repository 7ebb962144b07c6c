//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Compile-check every allowlist and rewrite regex
//! - Validate value ranges and socket addresses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use regex::Regex;
use thiserror::Error;

use crate::config::schema::ProxyConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid regex `{pattern}`: {reason}")]
    InvalidPattern {
        field: &'static str,
        pattern: String,
        reason: String,
    },

    #[error("{field}: `{value}` is not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("mock.api_prefixes: prefix `{0}` must be a single non-empty path segment")]
    InvalidPrefix(String),

    #[error("mock.fixture_root must not be empty")]
    EmptyFixtureRoot,

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,
}

/// Validate a parsed configuration, collecting every error.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if let Some(upstream) = &config.upstream.address {
        check_address(&mut errors, "upstream.address", upstream);
    }
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let mock = &config.mock;
    if mock.fixture_root.trim().is_empty() {
        errors.push(ValidationError::EmptyFixtureRoot);
    }
    for pattern in &mock.url_allowlist {
        check_pattern(&mut errors, "mock.url_allowlist", pattern);
    }
    for rule in &mock.segment_rewrites {
        check_pattern(&mut errors, "mock.segment_rewrites", &rule.pattern);
    }
    for prefix in &mock.api_prefixes {
        if prefix.is_empty() || prefix.contains('/') {
            errors.push(ValidationError::InvalidPrefix(prefix.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

fn check_pattern(errors: &mut Vec<ValidationError>, field: &'static str, pattern: &str) {
    if let Err(e) = Regex::new(pattern) {
        errors.push(ValidationError::InvalidPattern {
            field,
            pattern: pattern.to_string(),
            reason: e.to_string(),
        });
    }
}
