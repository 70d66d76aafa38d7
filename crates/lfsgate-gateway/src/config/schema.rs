use serde::Deserialize;

use lfsgate_core::error::{LfsGateError, Result};
use lfsgate_core::protocol::{AccessPolicy, PermissionLevel};

use crate::pipeline::PipelineConfig;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    pub github: GitHubSection,

    pub large_file_store: LargeFileStoreSection,

    #[serde(default)]
    pub access: AccessSection,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(LfsGateError::Config(format!(
                "unsupported config version {} (expected 1)",
                self.version
            )));
        }

        self.gateway.validate()?;
        self.github.validate()?;

        if self.large_file_store.bucket_name.trim().is_empty() {
            return Err(LfsGateError::Config(
                "large_file_store.bucket_name must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Per-invocation parameter bundle handed to the pipeline.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            owner: self.github.owner.clone(),
            repo: self.github.repo.clone(),
            bucket: self.large_file_store.bucket_name.clone(),
            policy: AccessPolicy::new(self.access.minimum),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        if !(1024..=16 * 1024 * 1024).contains(&self.max_body_bytes) {
            return Err(LfsGateError::Config(
                "gateway.max_body_bytes must be between 1024 and 16777216".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_max_body_bytes() -> usize {
    1024 * 1024
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitHubSection {
    pub owner: String,
    pub repo: String,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl GitHubSection {
    pub fn validate(&self) -> Result<()> {
        if self.owner.trim().is_empty() || self.repo.trim().is_empty() {
            return Err(LfsGateError::Config(
                "github.owner and github.repo must not be empty".into(),
            ));
        }
        if !(self.api_url.starts_with("https://") || self.api_url.starts_with("http://")) {
            return Err(LfsGateError::Config(
                "github.api_url must be an http(s) URL".into(),
            ));
        }
        if !(100..=60000).contains(&self.timeout_ms) {
            return Err(LfsGateError::Config(
                "github.timeout_ms must be between 100 and 60000".into(),
            ));
        }
        Ok(())
    }
}

fn default_api_url() -> String {
    "https://api.github.com/graphql".into()
}
fn default_timeout_ms() -> u64 {
    10000
}
fn default_user_agent() -> String {
    concat!("lfsgate/", env!("CARGO_PKG_VERSION")).into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LargeFileStoreSection {
    pub bucket_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessSection {
    #[serde(default = "default_minimum")]
    pub minimum: PermissionLevel,
}

impl Default for AccessSection {
    fn default() -> Self {
        Self {
            minimum: default_minimum(),
        }
    }
}

fn default_minimum() -> PermissionLevel {
    PermissionLevel::Admin
}
