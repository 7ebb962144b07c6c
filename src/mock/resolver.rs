//! Fixture lookup on disk.
//!
//! Candidates are tried strictly in order. A missing file is an ordinary
//! miss; an unreadable or malformed file is logged and also treated as a
//! miss, so one broken fixture never hides a valid fallback.

use std::io::ErrorKind;
use std::path::{Component, Path};

use serde_json::Value;
use thiserror::Error;

use crate::observability::metrics;

/// A fixture that was found and parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFixture {
    /// Parsed document.
    pub content: Value,
    /// Candidate name, relative to the fixture root.
    pub used_path: String,
}

/// Why a candidate that exists could not be used.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixture `{path}`: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("fixture `{path}` is not valid JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("fixture name `{0}` is not a plain relative path")]
    InvalidName(String),
}

/// Return the first candidate under `fixture_root` that exists and parses.
pub async fn resolve(candidates: &[String], fixture_root: &Path) -> Option<ResolvedFixture> {
    for candidate in candidates {
        match load(fixture_root, candidate).await {
            Ok(Some(content)) => {
                return Some(ResolvedFixture {
                    content,
                    used_path: candidate.clone(),
                });
            }
            Ok(None) => {}
            Err(e @ FixtureError::InvalidName(_)) => {
                tracing::warn!(error = %e, "Skipping fixture candidate");
            }
            Err(e) => {
                tracing::error!(error = %e, "Fixture unusable, trying next candidate");
                metrics::record_fixture_error();
            }
        }
    }
    None
}

/// `Ok(None)` when the file does not exist.
async fn load(root: &Path, candidate: &str) -> Result<Option<Value>, FixtureError> {
    if !is_plain_relative(candidate) {
        return Err(FixtureError::InvalidName(candidate.to_string()));
    }

    let bytes = match tokio::fs::read(root.join(candidate)).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(FixtureError::Read {
                path: candidate.to_string(),
                source,
            })
        }
    };

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|source| FixtureError::Parse {
            path: candidate.to_string(),
            source,
        })
}

fn is_plain_relative(candidate: &str) -> bool {
    let path = Path::new(candidate);
    path.components().next().is_some()
        && path.components().all(|c| matches!(c, Component::Normal(_)))
}
