//! Shared application state for the gateway.
//!
//! Startup errors are returned as `Result` instead of panicking.

use std::sync::Arc;

use lfsgate_core::error::{LfsGateError, Result};

use crate::config::GatewayConfig;
use crate::dispatch::Dispatcher;
use crate::obs::GatewayMetrics;
use crate::pipeline::{Pipeline, PipelineConfig};
use crate::resolver::{GitHubResolver, PermissionResolver};
use crate::services::BatchService;

/// Operations the HTTP router exposes; each needs a registered handler.
const ROUTED_OPERATIONS: [&str; 1] = ["batch"];

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    pipeline_cfg: PipelineConfig,
    pipeline: Pipeline,
    metrics: Arc<GatewayMetrics>,
}

impl AppState {
    /// Build state with the GitHub GraphQL resolver.
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        let resolver = GitHubResolver::new(&cfg.github)?;
        Self::with_resolver(cfg, Arc::new(resolver))
    }

    /// Build state around any resolver (tests inject fakes here).
    pub fn with_resolver(cfg: GatewayConfig, resolver: Arc<dyn PermissionResolver>) -> Result<Self> {
        let metrics = Arc::new(GatewayMetrics::default());
        let dispatcher = Dispatcher::new(Arc::clone(&metrics));
        dispatcher.register(Arc::new(BatchService::new()));

        let registered = dispatcher.registered_operations();
        for op in ROUTED_OPERATIONS {
            if !registered.contains(&op) {
                return Err(LfsGateError::Config(format!(
                    "routed operation has no registered handler: {op}"
                )));
            }
        }

        let pipeline = Pipeline::new(resolver, Arc::new(dispatcher), Arc::clone(&metrics));
        let pipeline_cfg = cfg.pipeline_config();

        tracing::info!(
            owner = %pipeline_cfg.owner,
            repo = %pipeline_cfg.repo,
            bucket = %pipeline_cfg.bucket,
            minimum = %pipeline_cfg.policy.minimum,
            "gateway state ready"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                pipeline_cfg,
                pipeline,
                metrics,
            }),
        })
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn pipeline_config(&self) -> &PipelineConfig {
        &self.inner.pipeline_cfg
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.inner.pipeline
    }

    pub fn metrics(&self) -> Arc<GatewayMetrics> {
        Arc::clone(&self.inner.metrics)
    }
}
