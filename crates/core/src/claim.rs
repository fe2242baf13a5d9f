use serde::{Deserialize, Serialize};

/// Well-known claim types shared by the session and policy layers.
pub mod claim_types {
    /// Display name of the authenticated actor.
    pub const NAME: &str = "Gemstone.Name";

    /// Coarse role grants (access level names, session marker).
    pub const ROLE: &str = "Gemstone.Role";

    /// Explicit per-action allow rule.
    pub const RESOURCE_ACTION_ALLOW: &str = "ResourceAction.Allow";

    /// Explicit per-action deny rule.
    pub const RESOURCE_ACTION_DENY: &str = "ResourceAction.Deny";

    /// Resource-wide access-level allow rule.
    pub const RESOURCE_ACCESS_ALLOW: &str = "ResourceAccess.Allow";

    /// Resource-wide access-level deny rule.
    pub const RESOURCE_ACCESS_DENY: &str = "ResourceAccess.Deny";
}

/// A single (type, value) assertion about an identity.
///
/// Claims are unordered, and `(type, value)` duplicates are idempotent:
/// adding the same pair twice has no observable effect beyond the first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Claim {
    pub claim_type: String,
    pub value: String,
}

impl Claim {
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
        }
    }

    /// Shorthand for a `Gemstone.Role` claim.
    pub fn role(value: impl Into<String>) -> Self {
        Self::new(claim_types::ROLE, value)
    }

    /// Shorthand for a `Gemstone.Name` claim.
    pub fn name(value: impl Into<String>) -> Self {
        Self::new(claim_types::NAME, value)
    }
}

impl core::fmt::Display for Claim {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}={}", self.claim_type, self.value)
    }
}
