//! Token-keyed session store over the expiring cache.

use crate::cache::{Expiration, MemoryCache};
use crate::config::SessionConfig;
use crate::ticket::SessionTicket;
use crate::token::{issue_token, SessionToken, TokenError};

/// Sliding-expiration session store.
///
/// Misses are normal absences, never errors. Entries idle out after
/// `idle_timeout` without access and are hard-bounded at `issued_at +
/// lifetime` no matter how often they are refreshed. Memory-pressure
/// eviction beyond expiration is the cache's concern, not this type's.
pub struct SessionStore {
    cache: MemoryCache<SessionTicket>,
    config: SessionConfig,
}

impl SessionStore {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            cache: MemoryCache::new(),
            config,
        }
    }

    /// Store whose cache runs `hook` when a ticket is removed or expires.
    pub fn with_removal_hook(
        config: SessionConfig,
        hook: impl Fn(&str, &SessionTicket) + Send + Sync + 'static,
    ) -> Self {
        Self {
            cache: MemoryCache::with_removal_hook(hook),
            config,
        }
    }

    fn expiration_for(&self, ticket: &SessionTicket) -> Expiration {
        Expiration::SlidingBounded {
            idle: self.config.idle_timeout,
            until: ticket.issued_at + self.config.lifetime,
        }
    }

    /// Insert `ticket` under a freshly generated token and return the token.
    /// Fails only when the OS entropy source does, in which case nothing is
    /// stored.
    pub fn store(&self, ticket: SessionTicket) -> Result<SessionToken, TokenError> {
        let token = issue_token()?;
        tracing::debug!(session_id = %ticket.session_id, "session stored");
        let expiration = self.expiration_for(&ticket);
        self.cache.insert(token.clone(), ticket, expiration);
        Ok(token)
    }

    /// Ticket for `token` if present and unexpired. A hit resets the sliding
    /// window, clamped by the absolute lifetime bound.
    pub fn retrieve(&self, token: &str) -> Option<SessionTicket> {
        self.cache.get(token)
    }

    /// Overwrite the ticket for an existing token and reset its expiration.
    /// Renewing an absent token is a no-op (a logged-out session must stay
    /// gone); racing renews are last-writer-wins, each supplying a complete
    /// replacement value.
    pub fn renew(&self, token: &str, ticket: SessionTicket) -> bool {
        let expiration = self.expiration_for(&ticket);
        self.cache.renew(token, ticket, expiration)
    }

    /// Delete the entry immediately. Idempotent.
    pub fn remove(&self, token: &str) {
        self.cache.remove(token);
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use gemstone_core::ClaimsIdentity;

    fn ticket(name: &str) -> SessionTicket {
        SessionTicket::snapshot(&ClaimsIdentity::authenticated("Basic").with_name(name))
    }

    #[test]
    fn store_then_retrieve_round_trips() {
        let store = SessionStore::new(SessionConfig::default());
        let original = ticket("alice");

        let token = store.store(original.clone()).unwrap();
        let retrieved = store.retrieve(&token).expect("ticket should be present");
        assert_eq!(retrieved, original);
    }

    #[test]
    fn remove_then_retrieve_is_absent() {
        let store = SessionStore::new(SessionConfig::default());
        let token = store.store(ticket("bob")).unwrap();

        store.remove(&token);
        assert!(store.retrieve(&token).is_none());

        // Idempotent.
        store.remove(&token);
    }

    #[test]
    fn retrieve_of_unknown_token_is_a_miss_not_an_error() {
        let store = SessionStore::new(SessionConfig::default());
        assert!(store.retrieve("no-such-token").is_none());
    }

    #[test]
    fn renew_replaces_the_ticket_wholesale() {
        let store = SessionStore::new(SessionConfig::default());
        let token = store.store(ticket("carol")).unwrap();

        let replacement = ticket("carol-renewed");
        assert!(store.renew(&token, replacement.clone()));

        assert_eq!(store.retrieve(&token), Some(replacement));
    }

    #[test]
    fn renew_of_missing_token_is_a_no_op() {
        let store = SessionStore::new(SessionConfig::default());
        assert!(!store.renew("gone", ticket("eve")));
        assert!(store.retrieve("gone").is_none());
    }

    #[test]
    fn tokens_are_unique_per_store_call() {
        let store = SessionStore::new(SessionConfig::default());
        let a = store.store(ticket("a")).unwrap();
        let b = store.store(ticket("b")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn removal_hook_fires_for_flushed_sessions() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let store = SessionStore::with_removal_hook(SessionConfig::default(), move |_, _| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        let token = store.store(ticket("dave")).unwrap();
        store.remove(&token);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
