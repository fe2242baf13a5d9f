use std::sync::Arc;

use gemstone_core::ClaimsIdentity;
use gemstone_session::SessionToken;

/// Effective identity for a request, plus the session token when the
/// identity was restored from (or stored into) the session store.
///
/// Inserted into request extensions by the session middleware; absent for
/// anonymous requests.
#[derive(Debug, Clone)]
pub struct SessionContext {
    identity: Arc<ClaimsIdentity>,
    token: Option<SessionToken>,
}

impl SessionContext {
    pub fn new(identity: ClaimsIdentity, token: Option<SessionToken>) -> Self {
        Self {
            identity: Arc::new(identity),
            token,
        }
    }

    pub fn identity(&self) -> &ClaimsIdentity {
        &self.identity
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}
