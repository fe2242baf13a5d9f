use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use gemstone_core::{Claim, ClaimsIdentity};

/// Scheme tag applied to identities authenticated from Basic credentials.
pub const BASIC_SCHEME: &str = "Basic";

/// Credential-validation collaborator invoked by the session middleware for
/// requests carrying an explicit `Authorization` header.
///
/// Returning `None` means the credentials were rejected. Rejection is a
/// normal outcome represented as an unauthenticated result, not an error.
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, authorization: &str) -> Option<ClaimsIdentity>;
}

/// Static-credential Basic authenticator.
///
/// Intended for tests/dev and small deployments; real deployments plug in
/// their own [`Authenticator`] backed by a directory or token service.
#[derive(Debug, Default)]
pub struct BasicAuthenticator {
    users: HashMap<String, BasicUser>,
}

#[derive(Debug, Clone)]
struct BasicUser {
    password: String,
    claims: Vec<Claim>,
}

impl BasicAuthenticator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user along with the claims granted on successful login.
    pub fn with_user(
        mut self,
        name: impl Into<String>,
        password: impl Into<String>,
        claims: impl IntoIterator<Item = Claim>,
    ) -> Self {
        self.users.insert(
            name.into(),
            BasicUser {
                password: password.into(),
                claims: claims.into_iter().collect(),
            },
        );
        self
    }
}

impl Authenticator for BasicAuthenticator {
    fn authenticate(&self, authorization: &str) -> Option<ClaimsIdentity> {
        let encoded = authorization.strip_prefix("Basic ")?.trim();
        let decoded = STANDARD.decode(encoded).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (name, password) = decoded.split_once(':')?;

        let user = self.users.get(name)?;
        if user.password != password {
            return None;
        }

        Some(
            ClaimsIdentity::authenticated(BASIC_SCHEME)
                .with_name(name)
                .with_claims(user.claims.iter().cloned()),
        )
    }
}
