//! Fixture interception subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, url)
//!     → gate.rs (allowlist + global toggle)
//!     → normalizer.rs (url + method → candidate file names)
//!     → resolver.rs (first candidate that reads and parses)
//!     → interceptor.rs (write fixture response or call next)
//! ```
//!
//! # Design Decisions
//! - Configuration compiled once at startup, read-only afterwards
//! - Gate and normalizer are pure functions of their inputs
//! - Fixtures are re-read on every request, never cached
//! - Every failure degrades to "no fixture", never to an error response

pub mod gate;
pub mod interceptor;
pub mod normalizer;
pub mod resolver;

use std::path::PathBuf;

use regex::Regex;

use crate::config::MockSettings;

pub use gate::is_eligible;
pub use interceptor::{intercept, Decision, Interceptor};
pub use normalizer::build_candidates;
pub use resolver::{resolve, ResolvedFixture};

/// Compiled, immutable interception configuration.
#[derive(Debug, Clone)]
pub struct Configuration {
    /// Absolute directory all candidates are looked up under.
    pub fixture_root: PathBuf,
    /// A URL matching none of these is never intercepted. Empty = match all.
    pub url_allowlist: Vec<Regex>,
    /// Applied in order to the hyphen-joined path.
    pub segment_rewrites: Vec<SegmentRewrite>,
    /// Leading segments stripped before flattening.
    pub api_prefixes: Vec<String>,
    pub logging_enabled: bool,
}

/// A compiled `(pattern, replacement)` rule.
#[derive(Debug, Clone)]
pub struct SegmentRewrite {
    pub pattern: Regex,
    pub replacement: String,
}

impl MockSettings {
    /// Compile patterns into the runtime [`Configuration`].
    pub fn compile(&self) -> Result<Configuration, regex::Error> {
        let url_allowlist = self
            .url_allowlist
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        let segment_rewrites = self
            .segment_rewrites
            .iter()
            .map(|rule| {
                Ok(SegmentRewrite {
                    pattern: Regex::new(&rule.pattern)?,
                    replacement: rule.replacement.clone(),
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;

        Ok(Configuration {
            fixture_root: PathBuf::from(&self.fixture_root),
            url_allowlist,
            segment_rewrites,
            api_prefixes: self.api_prefixes.clone(),
            logging_enabled: self.logging_enabled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SegmentRewriteConfig;

    #[test]
    fn test_compile_defaults() {
        let config = MockSettings::default().compile().unwrap();
        assert_eq!(config.url_allowlist.len(), 3);
        assert_eq!(config.segment_rewrites.len(), 4);
        assert_eq!(config.fixture_root, PathBuf::from("mock"));
    }

    #[test]
    fn test_compile_rejects_bad_rewrite() {
        let settings = MockSettings {
            segment_rewrites: vec![SegmentRewriteConfig::new("(", "_")],
            ..MockSettings::default()
        };
        assert!(settings.compile().is_err());
    }
}
