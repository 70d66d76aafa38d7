//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;

use lfsgate_core::error::{LfsGateError, Result};

pub use schema::{AccessSection, GatewayConfig, GatewaySection, GitHubSection, LargeFileStoreSection};

/// Environment variable naming the config file path.
pub const CONFIG_PATH_ENV: &str = "LFSGATE_CONFIG";
/// Config path used when `LFSGATE_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "lfsgate.yaml";

pub fn load_from_env() -> Result<GatewayConfig> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<GatewayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| LfsGateError::Config(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| LfsGateError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
