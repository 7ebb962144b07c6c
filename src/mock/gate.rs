//! Interception eligibility.
//!
//! The global toggle is a parameter rather than an environment lookup so the
//! predicate stays pure; the binary reads the real switch once at startup.

use crate::mock::normalizer::strip_query;
use crate::mock::Configuration;

/// Decide whether `url` may be served from a fixture.
pub fn is_eligible(url: &str, config: &Configuration, global_enable: bool) -> bool {
    if !global_enable {
        return false;
    }
    if config.url_allowlist.is_empty() {
        return true;
    }
    let path = strip_query(url);
    config.url_allowlist.iter().any(|pattern| pattern.is_match(path))
}
