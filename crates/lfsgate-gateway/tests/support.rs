//! Fakes shared by gateway integration tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use lfsgate_core::error::{LfsGateError, Result};
use lfsgate_core::protocol::{
    AccessPolicy, Credential, PermissionLevel, ResolverOutcome, ResponseEnvelope,
};
use lfsgate_gateway::dispatch::StorageHandler;
use lfsgate_gateway::pipeline::PipelineConfig;
use lfsgate_gateway::resolver::PermissionResolver;

pub fn pipeline_config(minimum: PermissionLevel) -> PipelineConfig {
    PipelineConfig {
        owner: "acme".into(),
        repo: "assets".into(),
        bucket: "acme-lfs".into(),
        policy: AccessPolicy::new(minimum),
    }
}

/// Resolver returning a fixed outcome and recording what it was asked.
pub struct FixedResolver {
    outcome: std::result::Result<ResolverOutcome, String>,
    pub calls: Mutex<Vec<(String, String, String)>>,
}

impl FixedResolver {
    pub fn new(outcome: ResolverOutcome) -> Self {
        Self {
            outcome: Ok(outcome),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn undecodable(raw: &str) -> Self {
        Self {
            outcome: Err(raw.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl PermissionResolver for FixedResolver {
    async fn resolve(
        &self,
        credential: &Credential,
        owner: &str,
        repo: &str,
    ) -> Result<ResolverOutcome> {
        self.calls.lock().unwrap().push((
            credential.expose().to_string(),
            owner.to_string(),
            repo.to_string(),
        ));
        self.outcome
            .clone()
            .map_err(LfsGateError::PermissionDecode)
    }
}

/// Handler recording its inputs and answering a fixed envelope.
pub struct RecordingHandler {
    pub seen: Mutex<Vec<(Value, PermissionLevel)>>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self {
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn reply() -> ResponseEnvelope {
        ResponseEnvelope::lfs(200, json!({ "transfer": "basic", "objects": [] }))
            .with_header("X-Handler", "recording")
    }

    pub fn invocations(&self) -> Vec<(Value, PermissionLevel)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl StorageHandler for RecordingHandler {
    fn operation(&self) -> &'static str {
        "batch"
    }

    async fn handle(
        &self,
        _cfg: &PipelineConfig,
        data: Value,
        access: PermissionLevel,
    ) -> Result<ResponseEnvelope> {
        self.seen.lock().unwrap().push((data, access));
        Ok(Self::reply())
    }
}

/// Handler that always rejects the payload.
pub struct RejectingHandler;

#[async_trait]
impl StorageHandler for RejectingHandler {
    fn operation(&self) -> &'static str {
        "verify"
    }

    async fn handle(
        &self,
        _cfg: &PipelineConfig,
        _data: Value,
        _access: PermissionLevel,
    ) -> Result<ResponseEnvelope> {
        Err(LfsGateError::Unprocessable("object size mismatch".into()))
    }
}
