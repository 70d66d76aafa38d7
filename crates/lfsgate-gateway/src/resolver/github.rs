//! GitHub GraphQL backed resolver.
//!
//! Sends a single `viewerPermission` query with the caller's credential as
//! the `Authorization` header. The client-level timeout bounds the call; an
//! expired deadline is reported as an upstream failure like any other
//! transport error.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, warn};

use lfsgate_core::error::{LfsGateError, Result};
use lfsgate_core::protocol::{Credential, PermissionLevel, ResolverOutcome};

use crate::config::GitHubSection;

use super::PermissionResolver;

/// Selects only the viewer's permission on one repository.
pub const VIEWER_PERMISSION_QUERY: &str =
    "query($owner: String!, $name: String!) { repository(owner: $owner, name: $name) { viewerPermission } }";

pub struct GitHubResolver {
    http: reqwest::Client,
    api_url: String,
}

impl GitHubResolver {
    pub fn new(cfg: &GitHubSection) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(cfg.user_agent.as_str())
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()
            .map_err(|e| LfsGateError::Config(format!("failed to build http client: {e}")))?;

        Ok(Self {
            http,
            api_url: cfg.api_url.clone(),
        })
    }
}

#[async_trait]
impl PermissionResolver for GitHubResolver {
    async fn resolve(
        &self,
        credential: &Credential,
        owner: &str,
        repo: &str,
    ) -> Result<ResolverOutcome> {
        let payload = json!({
            "query": VIEWER_PERMISSION_QUERY,
            "variables": { "owner": owner, "name": repo },
        });

        let resp = match self
            .http
            .post(&self.api_url)
            .header(reqwest::header::AUTHORIZATION, credential.expose())
            .json(&payload)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                warn!(%owner, %repo, timeout = e.is_timeout(), error = %e, "GitHub query failed");
                return Ok(ResolverOutcome::UpstreamFailure);
            }
        };

        let status = resp.status();
        if !status.is_success() {
            warn!(%owner, %repo, %status, "GitHub API returned non-success for permission query");
            return Ok(ResolverOutcome::UpstreamFailure);
        }

        let body = match resp.bytes().await {
            Ok(b) => b,
            Err(e) => {
                warn!(%owner, %repo, error = %e, "failed to read GitHub response body");
                return Ok(ResolverOutcome::UpstreamFailure);
            }
        };

        decode_viewer_permission(&body)
    }
}

/// Interpret a GraphQL response body.
///
/// - no `data` object, or `data` without a `repository` key: upstream failure
/// - `data.repository == null`: repository inaccessible
/// - `viewerPermission == null`: `NONE`
/// - unknown permission string: `PermissionDecode` error
pub fn decode_viewer_permission(body: &[u8]) -> Result<ResolverOutcome> {
    let v: Value = match serde_json::from_slice(body) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "GitHub response is not valid JSON");
            return Ok(ResolverOutcome::UpstreamFailure);
        }
    };

    let errors = graphql_error_messages(&v);
    if !errors.is_empty() {
        debug!(errors = %errors.join("; "), "GitHub query returned errors");
    }

    let Some(data) = v.get("data").filter(|d| d.is_object()) else {
        warn!(errors = %errors.join("; "), "GitHub query returned no data");
        return Ok(ResolverOutcome::UpstreamFailure);
    };

    let repository = match data.get("repository") {
        None => {
            warn!("GitHub query result has no repository field");
            return Ok(ResolverOutcome::UpstreamFailure);
        }
        Some(Value::Null) => return Ok(ResolverOutcome::RepositoryInaccessible),
        Some(r) => r,
    };

    match repository.get("viewerPermission") {
        Some(Value::String(s)) => {
            let level: PermissionLevel = s.parse()?;
            debug!(%level, "GitHub viewer permission resolved");
            Ok(ResolverOutcome::Resolved(level))
        }
        Some(Value::Null) => Ok(ResolverOutcome::Resolved(PermissionLevel::None)),
        Some(other) => Err(LfsGateError::PermissionDecode(other.to_string())),
        None => {
            warn!("GitHub repository object lacks viewerPermission");
            Ok(ResolverOutcome::UpstreamFailure)
        }
    }
}

fn graphql_error_messages(v: &Value) -> Vec<String> {
    v.get("errors")
        .and_then(|e| e.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|e| e.get("message").and_then(|m| m.as_str()))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
