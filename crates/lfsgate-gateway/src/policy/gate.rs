use lfsgate_core::protocol::{AccessPolicy, Denial, PermissionLevel};

/// Decision from the access gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow(PermissionLevel),
    Deny(Denial),
}

/// True iff `level` meets or exceeds `policy.minimum`.
pub fn decide(level: PermissionLevel, policy: &AccessPolicy) -> bool {
    policy.allows(level)
}

/// Gate a resolved level, producing the denial the pipeline should emit.
pub fn enforce(level: PermissionLevel, policy: &AccessPolicy) -> GateDecision {
    if decide(level, policy) {
        GateDecision::Allow(level)
    } else {
        tracing::info!(%level, minimum = %policy.minimum, "permission below policy minimum");
        GateDecision::Deny(Denial::PolicyDenied)
    }
}
