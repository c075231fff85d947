//! Backend API proxy
//!
//! Forwards every `/api/*` request to the configured backend so the UI can
//! talk to it same-origin. Cookies, the CSRF header and `Set-Cookie` travel
//! through untouched; hop-by-hop headers are dropped in both directions.

use axum::{
    Json, Router,
    body::{Body, to_bytes},
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::any,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use crate::core::config::Config;

/// Largest request body forwarded upstream
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "host",
    "content-length",
];

/// Proxy errors
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("No backend configured. Set BACKEND_URL to enable the API.")]
    NotConfigured,

    #[error("Failed to read request body: {0}")]
    Body(String),

    #[error("Backend request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

/// Error body, shaped like the backend's own errors
#[derive(Debug, Serialize)]
struct DetailBody {
    detail: String,
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = match &self {
            ProxyError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            ProxyError::Body(_) => StatusCode::BAD_REQUEST,
            ProxyError::Upstream(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
        };

        let body = DetailBody {
            detail: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Proxy state
#[derive(Clone)]
pub struct ProxyState {
    client: reqwest::Client,
    backend_url: Option<String>,
}

impl ProxyState {
    pub fn new(config: &Config) -> Result<Self, ProxyError> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(config.backend_timeout)
            .build()?;

        Ok(Self {
            client,
            backend_url: config.backend_url.clone(),
        })
    }
}

/// Create the API proxy router
pub fn api_proxy_router(state: ProxyState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/api/{*path}", any(proxy_handler))
        .with_state(state)
}

/// ANY /api/{*path}
async fn proxy_handler(
    State(state): State<Arc<ProxyState>>,
    request: Request,
) -> Result<Response, ProxyError> {
    let backend = state
        .backend_url
        .as_deref()
        .ok_or(ProxyError::NotConfigured)?;

    let (parts, body) = request.into_parts();
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let url = upstream_url(backend, path_and_query);

    let body = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| ProxyError::Body(e.to_string()))?;

    let mut headers = end_to_end_headers(&parts.headers);
    if let Some(host) = parts.headers.get(header::HOST) {
        headers.insert("x-forwarded-host", host.clone());
    }

    tracing::info!("Proxying {} {}", parts.method, path_and_query);

    let upstream = state
        .client
        .request(parts.method, &url)
        .headers(headers)
        .body(body)
        .send()
        .await
        .inspect_err(|e| tracing::error!("Backend request to {} failed: {}", url, e))?;

    let status = upstream.status();
    let headers = end_to_end_headers(upstream.headers());
    let bytes = upstream.bytes().await?;

    if status.is_server_error() {
        tracing::warn!("Backend answered {} for {}", status, path_and_query);
    } else {
        tracing::debug!("Backend answered {} for {}", status, path_and_query);
    }

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}

/// Join the backend base URL with the incoming path and query
fn upstream_url(backend: &str, path_and_query: &str) -> String {
    format!("{}{}", backend.trim_end_matches('/'), path_and_query)
}

/// Copy headers, leaving out hop-by-hop ones
fn end_to_end_headers(headers: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if !HOP_BY_HOP.contains(&name.as_str()) {
            out.append(name.clone(), value.clone());
        }
    }
    out
}
