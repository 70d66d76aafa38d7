//! Axum router wiring.
//!
//! The batch endpoint is served both at the LFS server root and under the
//! conventional `<repo>.git/info/lfs` suffix.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, ops, transport};

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.cfg().gateway.max_body_bytes;

    Router::new()
        .route("/objects/batch", post(transport::http::batch))
        .route("/info/lfs/objects/batch", post(transport::http::batch))
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
