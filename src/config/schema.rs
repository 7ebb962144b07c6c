//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the fixture proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Real backend that unmatched requests are forwarded to.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Fixture interception settings.
    pub mock: MockSettings,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Upstream backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Backend address (e.g., "127.0.0.1:3000"). `None` answers 404 for
    /// every request that no fixture serves.
    pub address: Option<String>,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Fixture interception settings as written in the config file.
///
/// Patterns are kept as strings here; [`MockSettings::compile`] turns them
/// into the runtime [`Configuration`](crate::mock::Configuration).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MockSettings {
    /// Directory holding the fixture files. Relative paths are resolved
    /// against the config file's directory by the loader.
    pub fixture_root: String,

    /// Regexes a request path must match to be intercepted. Empty = all.
    pub url_allowlist: Vec<String>,

    /// Dynamic-segment rewrites, applied in order to the hyphen-joined path.
    pub segment_rewrites: Vec<SegmentRewriteConfig>,

    /// Leading path segments stripped before flattening. First match wins.
    pub api_prefixes: Vec<String>,

    /// Emit per-request diagnostic log lines.
    pub logging_enabled: bool,
}

impl Default for MockSettings {
    fn default() -> Self {
        Self {
            fixture_root: "mock".to_string(),
            url_allowlist: vec![
                "^/dev-api/".to_string(),
                "^/prod-api/".to_string(),
                "^/api/".to_string(),
            ],
            segment_rewrites: default_segment_rewrites(),
            api_prefixes: vec![
                "dev-api".to_string(),
                "prod-api".to_string(),
                "api".to_string(),
            ],
            logging_enabled: true,
        }
    }
}

/// One `(pattern, replacement)` rewrite rule.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct SegmentRewriteConfig {
    /// Regex matched against the hyphen-joined path.
    pub pattern: String,

    /// Replacement text; `$1`-style group references are expanded.
    pub replacement: String,
}

impl SegmentRewriteConfig {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

const UUID_SHAPE: &str =
    "[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}";

/// UUID rules come first: a UUID's last group can be all digits.
fn default_segment_rewrites() -> Vec<SegmentRewriteConfig> {
    vec![
        SegmentRewriteConfig::new(format!("-{UUID_SHAPE}$"), "-_uuid"),
        SegmentRewriteConfig::new(format!("-{UUID_SHAPE}-"), "-_uuid-"),
        SegmentRewriteConfig::new(r"-\d+$", "-_id"),
        SegmentRewriteConfig::new(r"-\d+-", "-_id-"),
    ]
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins if set.
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: ProxyConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:8080");
        assert!(config.upstream.address.is_none());
        assert_eq!(config.mock.api_prefixes, ["dev-api", "prod-api", "api"]);
        assert_eq!(config.mock.segment_rewrites.len(), 4);
        assert!(config.mock.logging_enabled);
    }

    #[test]
    fn test_parse_mock_section() {
        let config: ProxyConfig = toml::from_str(
            r#"
            [upstream]
            address = "127.0.0.1:3000"

            [mock]
            fixture_root = "/srv/fixtures"
            url_allowlist = []
            logging_enabled = false

            [[mock.segment_rewrites]]
            pattern = "-v\\d+-"
            replacement = "-_version-"
            "#,
        )
        .unwrap();

        assert_eq!(config.upstream.address.as_deref(), Some("127.0.0.1:3000"));
        assert_eq!(config.mock.fixture_root, "/srv/fixtures");
        assert!(config.mock.url_allowlist.is_empty());
        assert!(!config.mock.logging_enabled);
        assert_eq!(
            config.mock.segment_rewrites,
            vec![SegmentRewriteConfig::new(r"-v\d+-", "-_version-")]
        );
        // untouched keys keep their defaults
        assert_eq!(config.mock.api_prefixes.len(), 3);
    }
}
