//! Git LFS batch API handler.
//!
//! Validates the batch request and answers every object with a per-object
//! LFS error, since no object store is attached to this gateway. Uploads are
//! refused below WRITE regardless of the gate's minimum.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use lfsgate_core::error::{LfsGateError, Result};
use lfsgate_core::protocol::{PermissionLevel, ResponseEnvelope};

use crate::dispatch::StorageHandler;
use crate::pipeline::PipelineConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Operation {
    Upload,
    Download,
}

#[derive(Debug, Deserialize)]
struct BatchReq {
    operation: Operation,
    #[serde(default)]
    transfers: Option<Vec<String>>,
    objects: Vec<ObjectSpec>,
    #[serde(default)]
    hash_algo: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ObjectSpec {
    oid: String,
    size: i64,
}

#[derive(Default)]
pub struct BatchService;

impl BatchService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StorageHandler for BatchService {
    fn operation(&self) -> &'static str {
        "batch"
    }

    async fn handle(
        &self,
        cfg: &PipelineConfig,
        data: Value,
        access: PermissionLevel,
    ) -> Result<ResponseEnvelope> {
        let req: BatchReq = serde_json::from_value(data)
            .map_err(|e| LfsGateError::Unprocessable(format!("invalid batch request: {e}")))?;
        validate(&req)?;

        let object_error = if req.operation == Operation::Upload && access < PermissionLevel::Write {
            json!({ "code": 403, "message": "You need write access to upload objects." })
        } else {
            json!({
                "code": 501,
                "message": format!("Storage backend not available for bucket {}.", cfg.bucket),
            })
        };

        tracing::info!(
            operation = ?req.operation,
            objects = req.objects.len(),
            bucket = %cfg.bucket,
            %access,
            "batch request accepted"
        );

        let objects: Vec<Value> = req
            .objects
            .iter()
            .map(|o| json!({ "oid": o.oid, "size": o.size, "error": object_error }))
            .collect();

        Ok(ResponseEnvelope::lfs(
            200,
            json!({ "transfer": "basic", "objects": objects, "hash_algo": "sha256" }),
        ))
    }
}

fn validate(req: &BatchReq) -> Result<()> {
    if req.objects.is_empty() {
        return Err(LfsGateError::Unprocessable("objects must not be empty".into()));
    }
    if let Some(transfers) = &req.transfers {
        if !transfers.iter().any(|t| t == "basic") {
            return Err(LfsGateError::Unprocessable(
                "only the basic transfer adapter is supported".into(),
            ));
        }
    }
    if let Some(algo) = &req.hash_algo {
        if algo != "sha256" {
            return Err(LfsGateError::Unprocessable(format!(
                "unsupported hash algorithm: {algo}"
            )));
        }
    }
    for o in &req.objects {
        if o.oid.len() != 64 || hex::decode(&o.oid).is_err() {
            return Err(LfsGateError::Unprocessable(format!("invalid object id: {}", o.oid)));
        }
        if o.size < 0 {
            return Err(LfsGateError::Unprocessable(format!(
                "invalid size for object {}",
                o.oid
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lfsgate_core::protocol::AccessPolicy;

    const OID: &str = "4d7a214614ab2935c943f9e0ff69d22eadbb8f32b1258daaa5e2ca24d17e2393";

    fn cfg() -> PipelineConfig {
        PipelineConfig {
            owner: "acme".into(),
            repo: "assets".into(),
            bucket: "acme-lfs".into(),
            policy: AccessPolicy::new(PermissionLevel::Read),
        }
    }

    #[tokio::test]
    async fn download_answers_per_object() {
        let data = json!({ "operation": "download", "transfers": ["basic"], "objects": [{ "oid": OID, "size": 12345 }] });
        let env = BatchService::new().handle(&cfg(), data, PermissionLevel::Read).await.unwrap();
        assert_eq!(env.status_code, 200);
        let body = env.body.unwrap();
        assert_eq!(body["transfer"], "basic");
        assert_eq!(body["objects"][0]["oid"], OID);
        assert_eq!(body["objects"][0]["error"]["code"], 501);
        assert!(body["objects"][0]["error"]["message"].as_str().unwrap().contains("acme-lfs"));
    }

    #[tokio::test]
    async fn upload_below_write_is_refused_per_object() {
        let data = json!({ "operation": "upload", "objects": [{ "oid": OID, "size": 1 }] });
        let env = BatchService::new().handle(&cfg(), data, PermissionLevel::Triage).await.unwrap();
        assert_eq!(env.body.unwrap()["objects"][0]["error"]["code"], 403);
    }

    #[tokio::test]
    async fn invalid_requests_are_unprocessable() {
        let bad = [
            json!({ "operation": "delete", "objects": [{ "oid": OID, "size": 1 }] }),
            json!({ "operation": "download", "objects": [] }),
            json!({ "operation": "download", "objects": [{ "oid": "abc", "size": 1 }] }),
            json!({ "operation": "download", "objects": [{ "oid": OID, "size": -1 }] }),
            json!({ "operation": "download", "transfers": ["tus"], "objects": [{ "oid": OID, "size": 1 }] }),
            json!({ "operation": "download", "hash_algo": "sha512", "objects": [{ "oid": OID, "size": 1 }] }),
        ];
        for data in bad {
            let err = BatchService::new()
                .handle(&cfg(), data.clone(), PermissionLevel::Admin)
                .await
                .unwrap_err();
            assert_eq!(err.fault_code().status(), 422, "{data}");
        }
    }
}
