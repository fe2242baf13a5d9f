use serde::{Deserialize, Serialize};

use crate::claim::{claim_types, Claim};

/// A named actor plus a multiset of claims and an authentication-scheme tag.
///
/// This is an immutable value type: augmentation and snapshotting construct a
/// **new** identity rather than mutating in place, so callers holding the
/// pre-augmentation identity never observe aliased changes.
///
/// An identity is authenticated iff it carries a scheme tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimsIdentity {
    name: Option<String>,
    scheme: Option<String>,
    claims: Vec<Claim>,
}

impl ClaimsIdentity {
    /// An unauthenticated identity with no claims.
    pub fn anonymous() -> Self {
        Self {
            name: None,
            scheme: None,
            claims: Vec::new(),
        }
    }

    /// An authenticated (but unnamed) identity under the given scheme.
    pub fn authenticated(scheme: impl Into<String>) -> Self {
        Self {
            name: None,
            scheme: Some(scheme.into()),
            claims: Vec::new(),
        }
    }

    /// New identity with the display name set and the matching
    /// `Gemstone.Name` claim appended.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.push(Claim::name(name.clone()));
        self.name = Some(name);
        self
    }

    /// New identity with `claim` appended. `(type, value)` duplicates collapse.
    pub fn with_claim(mut self, claim: Claim) -> Self {
        self.push(claim);
        self
    }

    /// New identity with all `claims` appended. Duplicates collapse.
    pub fn with_claims(mut self, claims: impl IntoIterator<Item = Claim>) -> Self {
        for claim in claims {
            self.push(claim);
        }
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.scheme.is_some()
    }

    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    pub fn has_claim(&self, claim_type: &str, value: &str) -> bool {
        self.claims
            .iter()
            .any(|c| c.claim_type == claim_type && c.value == value)
    }

    /// Whether the identity holds a `Gemstone.Role` claim with this value.
    pub fn has_role(&self, role: &str) -> bool {
        self.has_claim(claim_types::ROLE, role)
    }

    /// First claim value of the given type, if any.
    pub fn find_first(&self, claim_type: &str) -> Option<&str> {
        self.claims
            .iter()
            .find(|c| c.claim_type == claim_type)
            .map(|c| c.value.as_str())
    }

    fn push(&mut self, claim: Claim) {
        if !self.claims.contains(&claim) {
            self.claims.push(claim);
        }
    }
}
