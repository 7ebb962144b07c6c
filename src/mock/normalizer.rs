//! Request URL → candidate fixture file names.
//!
//! # Algorithm
//! ```text
//! /dev-api/users/42?page=2   (GET)
//!     → users/42               strip query, leading '/', one API prefix
//!     → users-42               flatten: '/' → '-'
//!     → users-_id              segment rewrites, in order
//!     → [users-_id.get.json, users-_id.json]
//! ```
//!
//! Rewrites run after flattening, so rules are authored against the
//! hyphen-joined form. A consequence is that a hyphen inside a single path
//! segment is indistinguishable from a separator (`post-42` → `post-_id`).

use crate::mock::Configuration;

const FIXTURE_EXTENSION: &str = "json";

/// Build the ordered candidate list for a request: method-specific first,
/// method-agnostic second. Always returns exactly two entries.
pub fn build_candidates(url: &str, method: &str, config: &Configuration) -> Vec<String> {
    let base = normalize_path(url, config);
    let method = method.to_ascii_lowercase();

    vec![
        format!("{base}.{method}.{FIXTURE_EXTENSION}"),
        format!("{base}.{FIXTURE_EXTENSION}"),
    ]
}

/// The flat, rewritten base name shared by both candidates.
pub fn normalize_path(url: &str, config: &Configuration) -> String {
    let path = strip_query(url);
    let path = path.strip_prefix('/').unwrap_or(path);
    let path = strip_api_prefix(path, &config.api_prefixes);

    let mut flat = path.replace('/', "-");
    for rule in &config.segment_rewrites {
        // `replace` substitutes the first match only
        flat = rule
            .pattern
            .replace(&flat, rule.replacement.as_str())
            .into_owned();
    }
    flat
}

/// Drop the query string and fragment.
pub fn strip_query(url: &str) -> &str {
    url.split(['?', '#']).next().unwrap_or("")
}

fn strip_api_prefix<'a>(path: &'a str, prefixes: &[String]) -> &'a str {
    prefixes
        .iter()
        .find_map(|prefix| path.strip_prefix(prefix.as_str())?.strip_prefix('/'))
        .unwrap_or(path)
}
