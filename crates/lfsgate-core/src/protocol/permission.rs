//! Repository permission vocabulary and the access threshold.
//!
//! Mirrors the host's `RepositoryPermission` enum. Variants are declared in
//! ascending order so the derived `Ord` is the access order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LfsGateError;

/// Access tier of a caller on one repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermissionLevel {
    None,
    Read,
    Triage,
    Write,
    Maintain,
    Admin,
}

impl PermissionLevel {
    /// All tiers, lowest first.
    pub const ALL: [PermissionLevel; 6] = [
        PermissionLevel::None,
        PermissionLevel::Read,
        PermissionLevel::Triage,
        PermissionLevel::Write,
        PermissionLevel::Maintain,
        PermissionLevel::Admin,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PermissionLevel::None => "NONE",
            PermissionLevel::Read => "READ",
            PermissionLevel::Triage => "TRIAGE",
            PermissionLevel::Write => "WRITE",
            PermissionLevel::Maintain => "MAINTAIN",
            PermissionLevel::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermissionLevel {
    type Err = LfsGateError;

    /// Exact, case-sensitive match on the host's spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PermissionLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| LfsGateError::PermissionDecode(s.to_string()))
    }
}

/// Minimum tier a caller must hold for a request to reach storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPolicy {
    pub minimum: PermissionLevel,
}

impl AccessPolicy {
    pub fn new(minimum: PermissionLevel) -> Self {
        Self { minimum }
    }

    /// True iff `level` meets or exceeds the configured minimum.
    pub fn allows(&self, level: PermissionLevel) -> bool {
        level >= self.minimum
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::new(PermissionLevel::Admin)
    }
}

/// Result of asking the host for the caller's permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverOutcome {
    /// Host answered with a permission tier.
    Resolved(PermissionLevel),
    /// Host answered but returned no repository (missing, or private and the
    /// credential lacks private-repo scope).
    RepositoryInaccessible,
    /// The remote call failed (transport, auth rejection, timeout, garbage).
    UpstreamFailure,
}
