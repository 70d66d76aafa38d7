//! HTTP handlers for the Git LFS API.

use axum::{
    body::{Body, Bytes},
    extract::{rejection::BytesRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use base64::Engine as _;

use lfsgate_core::protocol::{Headers, IncomingRequest, RequestBody, WireResponse};

use crate::app_state::AppState;

/// `POST /objects/batch`
pub async fn batch(
    State(app): State<AppState>,
    headers: HeaderMap,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Response {
    match body {
        Ok(body) => lfs_operation(&app, "batch", &headers, body).await,
        Err(rejection) => {
            let wire = app.pipeline().reject_unreadable_body(
                &to_headers(&headers),
                rejection.status().as_u16(),
                &rejection.body_text(),
            );
            into_http(wire)
        }
    }
}

async fn lfs_operation(app: &AppState, operation: &str, headers: &HeaderMap, body: Bytes) -> Response {
    let request = to_incoming(headers, body);
    let wire = app
        .pipeline()
        .process_request(app.pipeline_config(), operation, request)
        .await;
    into_http(wire)
}

/// Build the pipeline input. Header values that are not visible ASCII are
/// dropped; the body is carried raw and undecoded.
pub fn to_incoming(headers: &HeaderMap, body: Bytes) -> IncomingRequest {
    IncomingRequest::new(to_headers(headers), RequestBody::Raw(body), false)
}

pub fn to_headers(headers: &HeaderMap) -> Headers {
    headers
        .iter()
        .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.as_str(), v)))
        .collect()
}

/// Write a normalized response to HTTP.
pub fn into_http(wire: WireResponse) -> Response {
    let status = StatusCode::from_u16(wire.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let body = match wire.body {
        None => Body::empty(),
        Some(text) if wire.is_body_encoded => {
            match base64::engine::general_purpose::STANDARD.decode(text.as_bytes()) {
                Ok(bytes) => Body::from(bytes),
                Err(e) => {
                    tracing::error!(error = %e, "encoded response body is not base64");
                    return StatusCode::INTERNAL_SERVER_ERROR.into_response();
                }
            }
        }
        Some(text) => Body::from(text),
    };

    let mut builder = axum::http::Response::builder().status(status);
    for (name, value) in wire.headers.iter() {
        builder = builder.header(name, value);
    }

    builder.body(body).unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to build http response");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    })
}
