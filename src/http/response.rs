//! Fixture-backed responses.
//!
//! # Responsibilities
//! - Serialize the parsed fixture back to JSON
//! - Mark the response as mock-originated (`X-Mock-By`)
//! - Name the fixture file that produced it (`X-Mock-File`)

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::Response,
};
use thiserror::Error;

use crate::mock::ResolvedFixture;

pub const X_MOCK_BY: &str = "x-mock-by";
pub const X_MOCK_FILE: &str = "x-mock-file";
pub const MOCK_BY_VALUE: &str = "fixture-proxy";
pub const JSON_UTF8: &str = "application/json; charset=utf-8";

#[derive(Debug, Error)]
pub enum FixtureResponseError {
    #[error("failed to serialize fixture: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to build response: {0}")]
    Build(#[from] axum::http::Error),
}

/// Build the `200 OK` response for a resolved fixture.
pub fn fixture_response(fixture: &ResolvedFixture) -> Result<Response, FixtureResponseError> {
    let body = serde_json::to_vec(&fixture.content)?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, JSON_UTF8)
        .header(X_MOCK_BY, MOCK_BY_VALUE)
        .header(X_MOCK_FILE, fixture.used_path.as_str())
        .body(Body::from(body))?;

    Ok(response)
}
