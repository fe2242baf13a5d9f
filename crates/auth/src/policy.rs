//! Tri-state access-policy evaluation.
//!
//! Rules are evaluated as an ordered list with fixed precedence:
//! action-level rules before access-level rules, and within a tier
//! Deny before Allow before "no opinion".

use gemstone_core::{claim_types, ClaimsIdentity};

use crate::access::{AccessRegistry, ResourceDescriptor};

/// Resource-type prefix baked into rule claim values.
const RESOURCE_TYPE: &str = "Controller";

/// Outcome of one policy evaluation.
///
/// `Deny` is terminal and carries the resource+action context that produced
/// it. `Indeterminate` means "no opinion": the caller defers to the next
/// configured policy, typically default-deny.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyDecision {
    Allow,
    Deny { reason: String },
    Indeterminate,
}

impl PolicyDecision {
    pub fn is_allow(&self) -> bool {
        matches!(self, PolicyDecision::Allow)
    }
}

/// Claim value identifying an exact (resource, action) or (resource, level)
/// pair, e.g. `"Controller Widgets Get"`.
fn rule_value(resource: &str, suffix: &str) -> String {
    format!("{RESOURCE_TYPE} {resource} {suffix}")
}

/// Resolve allow/deny for one protected operation.
///
/// - No IO
/// - No panics
/// - No side effects beyond the returned decision
///
/// A missing descriptor (unresolvable endpoint metadata) short-circuits to
/// `Indeterminate` rather than failing the request outright.
pub fn evaluate(
    identity: &ClaimsIdentity,
    descriptor: Option<&ResourceDescriptor>,
    method: &str,
    registry: &AccessRegistry,
) -> PolicyDecision {
    let Some(descriptor) = descriptor else {
        return PolicyDecision::Indeterminate;
    };

    // Action-level rules (most specific) win over everything below.
    let action_rule = rule_value(&descriptor.resource, &descriptor.action);
    if identity.has_claim(claim_types::RESOURCE_ACTION_DENY, &action_rule) {
        return PolicyDecision::Deny { reason: action_rule };
    }
    if identity.has_claim(claim_types::RESOURCE_ACTION_ALLOW, &action_rule) {
        return PolicyDecision::Allow;
    }

    // Access-level rules (resource-wide). A deny on any required level is
    // absolute for the whole set, not matched per level.
    let levels = registry.required_levels(descriptor, method);
    for level in &levels {
        let level_rule = rule_value(&descriptor.resource, level.as_str());
        if identity.has_claim(claim_types::RESOURCE_ACCESS_DENY, &level_rule) {
            return PolicyDecision::Deny { reason: action_rule };
        }
    }
    for level in &levels {
        let level_rule = rule_value(&descriptor.resource, level.as_str());
        if identity.has_claim(claim_types::RESOURCE_ACCESS_ALLOW, &level_rule) {
            return PolicyDecision::Allow;
        }
    }

    // Coarse role grant: a Gemstone.Role claim naming any required level.
    if levels.iter().any(|level| identity.has_role(level.as_str())) {
        return PolicyDecision::Allow;
    }

    PolicyDecision::Indeterminate
}
