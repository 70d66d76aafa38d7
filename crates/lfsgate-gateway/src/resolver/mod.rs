//! Permission resolution against the source-control host.
//!
//! The pipeline depends only on the [`PermissionResolver`] trait so tests can
//! substitute deterministic fakes; [`GitHubResolver`] is the production
//! implementation backed by the GitHub GraphQL API.

pub mod github;

use async_trait::async_trait;

use lfsgate_core::error::Result;
use lfsgate_core::protocol::{Credential, ResolverOutcome};

pub use github::GitHubResolver;

/// Answers "what may this credential do on owner/repo".
#[async_trait]
pub trait PermissionResolver: Send + Sync {
    /// Perform one remote query. Transport failures, timeouts and rejected
    /// credentials come back as `Ok(ResolverOutcome::UpstreamFailure)`; the
    /// only `Err` is an unrecognized permission string.
    async fn resolve(&self, credential: &Credential, owner: &str, repo: &str)
        -> Result<ResolverOutcome>;
}
