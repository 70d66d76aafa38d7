use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine as _;
use dashmap::DashMap;
use serde_json::Value;

use lfsgate_core::error::{LfsGateError, Result};
use lfsgate_core::protocol::{PermissionLevel, RequestBody, ResponseEnvelope};

use crate::obs::GatewayMetrics;
use crate::pipeline::PipelineConfig;

/// Storage-side handler for one LFS operation (e.g. `batch`).
///
/// Runs only after the caller passed the access gate. The returned envelope
/// is forwarded unchanged; its body must be structured or absent.
#[async_trait]
pub trait StorageHandler: Send + Sync {
    fn operation(&self) -> &'static str;
    async fn handle(
        &self,
        cfg: &PipelineConfig,
        data: Value,
        access: PermissionLevel,
    ) -> Result<ResponseEnvelope>;
}

/// Registry of storage handlers keyed by operation name.
pub struct Dispatcher {
    handlers: DashMap<&'static str, Arc<dyn StorageHandler>>,
    metrics: Arc<GatewayMetrics>,
}

impl Dispatcher {
    pub fn new(metrics: Arc<GatewayMetrics>) -> Self {
        Self {
            handlers: DashMap::new(),
            metrics,
        }
    }

    pub fn register(&self, handler: Arc<dyn StorageHandler>) {
        self.handlers.insert(handler.operation(), handler);
    }

    pub fn registered_operations(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|e| *e.key()).collect()
    }

    /// Normalize the body and invoke the handler for `operation`.
    pub async fn dispatch(
        &self,
        operation: &str,
        cfg: &PipelineConfig,
        body: RequestBody,
        is_body_encoded: bool,
        access: PermissionLevel,
    ) -> Result<ResponseEnvelope> {
        let handler = self
            .handlers
            .get(operation)
            .ok_or_else(|| LfsGateError::UnknownOperation(operation.to_string()))?
            .value()
            .clone();

        let data = normalize_body(body, is_body_encoded)?;
        let result = handler.handle(cfg, data, access).await;
        if result.is_err() {
            self.metrics.handler_errors.inc(&[("operation", handler.operation())]);
        }
        result
    }
}

/// Structured mappings pass through; raw bodies are base64-decoded when
/// flagged, then parsed as JSON.
pub fn normalize_body(body: RequestBody, is_body_encoded: bool) -> Result<Value> {
    match body {
        RequestBody::Structured(map) => Ok(Value::Object(map)),
        RequestBody::Raw(raw) => {
            tracing::debug!(len = raw.len(), encoded = is_body_encoded, "decoding request body");
            let text = if is_body_encoded {
                base64::engine::general_purpose::STANDARD
                    .decode(&raw)
                    .map_err(|e| LfsGateError::BodyDecode(format!("invalid base64: {e}")))?
            } else {
                raw.to_vec()
            };
            serde_json::from_slice(&text)
                .map_err(|e| LfsGateError::BodyDecode(format!("invalid json: {e}")))
        }
    }
}
