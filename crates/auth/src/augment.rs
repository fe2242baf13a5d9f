use gemstone_core::{claim_types, Claim, ClaimsIdentity};

/// External claims runtime consulted during augmentation.
///
/// Implementations look up the claims assigned to a provider identity,
/// typically by account name.
pub trait ClaimProvider: Send + Sync {
    fn claims_for(&self, provider_name: &str) -> Vec<Claim>;
}

/// Append provider-scoped claims to `base`, producing a new identity.
///
/// The result carries the base identity's display-name claim (when present)
/// plus every claim the runtime assigns to `provider_name`, tagged with
/// `scheme`. The base identity is never mutated, so callers retain safe
/// references to the pre-augmentation object. A missing name claim is not an
/// error; the runtime-assigned claims are still included.
pub fn augment(
    base: &ClaimsIdentity,
    provider_name: &str,
    provider: &dyn ClaimProvider,
    scheme: &str,
) -> ClaimsIdentity {
    let mut identity = ClaimsIdentity::authenticated(scheme);
    if let Some(name) = base.find_first(claim_types::NAME) {
        identity = identity.with_name(name.to_string());
    }
    identity.with_claims(provider.claims_for(provider_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProvider(Vec<Claim>);

    impl ClaimProvider for FixedProvider {
        fn claims_for(&self, _provider_name: &str) -> Vec<Claim> {
            self.0.clone()
        }
    }

    #[test]
    fn augmented_identity_keeps_name_and_gains_claims() {
        let base = ClaimsIdentity::authenticated("Basic").with_name("alice");
        let provider = FixedProvider(vec![Claim::role("Edit"), Claim::role("View")]);

        let augmented = augment(&base, "alice", &provider, "Session");

        assert_eq!(augmented.name(), Some("alice"));
        assert_eq!(augmented.scheme(), Some("Session"));
        assert!(augmented.has_role("Edit"));
        assert!(augmented.has_role("View"));
    }

    #[test]
    fn missing_name_claim_is_not_an_error() {
        let base = ClaimsIdentity::authenticated("Basic");
        let provider = FixedProvider(vec![Claim::role("Admin")]);

        let augmented = augment(&base, "service-account", &provider, "Session");

        assert!(augmented.name().is_none());
        assert!(augmented.has_role("Admin"));
    }

    #[test]
    fn duplicate_provider_claims_collapse() {
        let base = ClaimsIdentity::authenticated("Basic").with_name("bob");
        let provider = FixedProvider(vec![
            Claim::role("View"),
            Claim::role("View"),
            Claim::name("bob"),
        ]);

        let augmented = augment(&base, "bob", &provider, "Session");

        let roles = augmented
            .claims()
            .iter()
            .filter(|c| c.claim_type == claim_types::ROLE)
            .count();
        assert_eq!(roles, 1);

        let names = augmented
            .claims()
            .iter()
            .filter(|c| c.claim_type == claim_types::NAME)
            .count();
        assert_eq!(names, 1);
    }

    #[test]
    fn base_identity_is_untouched() {
        let base = ClaimsIdentity::authenticated("Basic").with_name("carol");
        let before = base.clone();
        let provider = FixedProvider(vec![Claim::role("Admin")]);

        let _ = augment(&base, "carol", &provider, "Session");

        assert_eq!(base, before);
    }
}
