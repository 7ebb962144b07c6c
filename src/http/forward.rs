//! Forwarding to the real backend.
//!
//! This is the continuation the interceptor delegates to when no fixture
//! applies. Requests are sent once; there are no retries.

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{
        uri::{Authority, PathAndQuery, Scheme},
        Request, StatusCode, Uri, Version,
    },
    response::{IntoResponse, Response},
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::http::request::RequestIdExt;
use crate::observability::metrics;

/// Client and target used by [`forward`].
#[derive(Clone)]
pub struct Upstream {
    client: Client<HttpConnector, Body>,
    authority: Option<Authority>,
}

impl Upstream {
    /// `None` means there is no backend and unmatched requests get a 404.
    pub fn new(address: Option<&str>) -> Result<Self, axum::http::uri::InvalidUri> {
        let authority = address.map(str::parse::<Authority>).transpose()?;
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Ok(Self { client, authority })
    }

    pub fn authority(&self) -> Option<&Authority> {
        self.authority.as_ref()
    }
}

/// Catch-all handler: send the request to the upstream and stream the answer back.
pub async fn forward(State(upstream): State<Upstream>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request.request_id().to_owned();
    let method = request.method().clone();

    let Some(authority) = upstream.authority.clone() else {
        tracing::debug!(request_id = %request_id, uri = %request.uri(), "No upstream configured");
        return (StatusCode::NOT_FOUND, "No upstream configured").into_response();
    };

    let (mut parts, body) = request.into_parts();
    let mut uri_parts = parts.uri.clone().into_parts();
    uri_parts.scheme = Some(Scheme::HTTP);
    uri_parts.authority = Some(authority);
    if uri_parts.path_and_query.is_none() {
        uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
    }
    parts.uri = match Uri::from_parts(uri_parts) {
        Ok(uri) => uri,
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Could not build upstream URI");
            return (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response();
        }
    };
    parts.version = Version::HTTP_11;

    tracing::debug!(request_id = %request_id, %method, uri = %parts.uri, "Forwarding request");

    match upstream.client.request(Request::from_parts(parts, body)).await {
        Ok(response) => {
            metrics::record_upstream(response.status().as_u16(), start_time);
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, %method, error = %e, "Upstream error");
            metrics::record_upstream(StatusCode::BAD_GATEWAY.as_u16(), start_time);
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}
