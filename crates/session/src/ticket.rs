use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gemstone_core::{Claim, ClaimsIdentity};

/// Role claim value marking an identity as restored from a session.
pub const SESSION_ROLE: &str = "Session";

/// Server-side snapshot of an authenticated identity.
///
/// The session id exists for diagnostics only; the token is the sole key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTicket {
    pub session_id: Uuid,
    pub identity: ClaimsIdentity,
    pub issued_at: DateTime<Utc>,
}

impl SessionTicket {
    /// Snapshot an identity for storage: a deep copy of its claims plus the
    /// synthetic `Session` role marker. The source identity is untouched.
    pub fn snapshot(identity: &ClaimsIdentity) -> Self {
        Self {
            session_id: Uuid::now_v7(),
            identity: identity.clone().with_claim(Claim::role(SESSION_ROLE)),
            issued_at: Utc::now(),
        }
    }
}
