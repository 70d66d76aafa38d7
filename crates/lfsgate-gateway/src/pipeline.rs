//! Authorization pipeline.
//!
//! Credential extraction -> permission resolution -> access gate -> dispatch,
//! with every branch converging on a single `normalize` before the response
//! leaves the gateway. Each run is independent: configuration is passed in
//! per call and nothing is shared between requests except the read-only
//! resolver, handler registry and metrics.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info_span, warn, Instrument};

use lfsgate_core::error::Result;
use lfsgate_core::protocol::{
    AccessPolicy, Denial, Headers, IncomingRequest, ResolverOutcome, ResponseEnvelope,
    WireResponse,
};

use crate::auth::extract_credential;
use crate::dispatch::Dispatcher;
use crate::obs::GatewayMetrics;
use crate::policy::{enforce, GateDecision};
use crate::resolver::PermissionResolver;

/// Read-only parameters for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub owner: String,
    pub repo: String,
    pub bucket: String,
    pub policy: AccessPolicy,
}

/// How a run ended before normalization.
#[derive(Debug)]
enum Outcome {
    Denied(Denial),
    Handled(ResponseEnvelope),
}

pub struct Pipeline {
    resolver: Arc<dyn PermissionResolver>,
    dispatcher: Arc<Dispatcher>,
    metrics: Arc<GatewayMetrics>,
}

impl Pipeline {
    pub fn new(
        resolver: Arc<dyn PermissionResolver>,
        dispatcher: Arc<Dispatcher>,
        metrics: Arc<GatewayMetrics>,
    ) -> Self {
        Self {
            resolver,
            dispatcher,
            metrics,
        }
    }

    /// Process one request to a wire-ready response. Never fails: faults are
    /// mapped to LFS error envelopes.
    pub async fn process_request(
        &self,
        cfg: &PipelineConfig,
        operation: &str,
        request: IncomingRequest,
    ) -> WireResponse {
        let span = info_span!("lfs_request", %operation, owner = %cfg.owner, repo = %cfg.repo);

        async move {
            let (label, envelope) = match self.run(cfg, operation, request).await {
                Ok(Outcome::Denied(d)) => (d.as_str(), d.envelope()),
                Ok(Outcome::Handled(env)) => ("allowed", env),
                Err(e) => {
                    let code = e.fault_code();
                    if code.status() >= 500 {
                        error!(code = code.as_str(), error = %e, "request failed");
                    } else {
                        warn!(code = code.as_str(), error = %e, "request rejected");
                    }
                    (
                        "fault",
                        ResponseEnvelope::lfs_error(
                            e.fault_code().status(),
                            &e.client_message(),
                            None,
                        ),
                    )
                }
            };

            self.metrics.auth_outcomes.inc(&[("outcome", label)]);
            debug!(outcome = label, status = envelope.status_code, "request finished");
            envelope.normalize()
        }
        .instrument(span)
        .await
    }

    /// Answer a request whose body the transport could not read (e.g. over
    /// the size limit). The credential check still runs first, so a caller
    /// without one gets the 401 prompt whatever the body.
    pub fn reject_unreadable_body(&self, headers: &Headers, status: u16, reason: &str) -> WireResponse {
        let (label, envelope) = match extract_credential(headers) {
            Err(d) => (d.as_str(), d.envelope()),
            Ok(_) => {
                warn!(status, %reason, "request body rejected by transport");
                ("body_rejected", ResponseEnvelope::lfs_error(status, reason, None))
            }
        };
        self.metrics.auth_outcomes.inc(&[("outcome", label)]);
        envelope.normalize()
    }

    async fn run(
        &self,
        cfg: &PipelineConfig,
        operation: &str,
        request: IncomingRequest,
    ) -> Result<Outcome> {
        let credential = match extract_credential(request.headers()) {
            Ok(c) => c,
            Err(d) => return Ok(Outcome::Denied(d)),
        };

        let started = Instant::now();
        let resolved = self
            .resolver
            .resolve(&credential, &cfg.owner, &cfg.repo)
            .await;
        self.metrics
            .resolver_duration
            .observe(&[], started.elapsed());

        let level = match resolved? {
            ResolverOutcome::Resolved(level) => level,
            ResolverOutcome::UpstreamFailure => return Ok(Outcome::Denied(Denial::UpstreamFailure)),
            ResolverOutcome::RepositoryInaccessible => {
                return Ok(Outcome::Denied(Denial::RepositoryInaccessible))
            }
        };
        debug!(%level, "viewer permission resolved");

        let level = match enforce(level, &cfg.policy) {
            GateDecision::Allow(level) => level,
            GateDecision::Deny(d) => return Ok(Outcome::Denied(d)),
        };

        let (body, is_body_encoded) = request.into_body();
        self.dispatcher
            .dispatch(operation, cfg, body, is_body_encoded, level)
            .await
            .map(Outcome::Handled)
    }
}
