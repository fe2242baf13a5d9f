//! Generic expiring key-value cache.
//!
//! Concurrent insert/get/remove from multiple in-flight requests are safe
//! without external locking; racing writers are last-writer-wins.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;

/// Expiration policy for one cache entry.
///
/// Exactly one mode is active per entry. `SlidingBounded` is a sliding
/// window that can never extend past its absolute bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiration {
    /// Fixed wall-clock deadline, independent of access pattern.
    Absolute(DateTime<Utc>),
    /// Deadline resets to now + idle on each access.
    Sliding(Duration),
    /// Sliding window capped by an absolute deadline.
    SlidingBounded { idle: Duration, until: DateTime<Utc> },
}

impl Expiration {
    fn deadline_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Expiration::Absolute(at) => *at,
            Expiration::Sliding(idle) => now + *idle,
            Expiration::SlidingBounded { idle, until } => std::cmp::min(now + *idle, *until),
        }
    }
}

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    policy: Expiration,
    expires_at: DateTime<Utc>,
}

/// Cleanup hook invoked synchronously with the (key, value) of an entry
/// removed explicitly or evicted on observed expiry.
pub type RemovalHook<V> = Box<dyn Fn(&str, &V) + Send + Sync>;

/// In-memory expiring cache keyed by opaque string tokens.
pub struct MemoryCache<V> {
    entries: RwLock<HashMap<String, Entry<V>>>,
    on_remove: Option<RemovalHook<V>>,
}

impl<V: Clone> MemoryCache<V> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            on_remove: None,
        }
    }

    /// Cache that runs `hook` whenever an entry is removed or expires.
    pub fn with_removal_hook(hook: impl Fn(&str, &V) + Send + Sync + 'static) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            on_remove: Some(Box::new(hook)),
        }
    }

    /// Create or overwrite the entry under `key`.
    pub fn insert(&self, key: impl Into<String>, value: V, policy: Expiration) {
        self.insert_at(key, value, policy, Utc::now());
    }

    /// Deterministic variant of [`insert`](Self::insert).
    pub fn insert_at(
        &self,
        key: impl Into<String>,
        value: V,
        policy: Expiration,
        now: DateTime<Utc>,
    ) {
        let expires_at = policy.deadline_from(now);
        self.entries.write().insert(
            key.into(),
            Entry {
                value,
                policy,
                expires_at,
            },
        );
    }

    /// Value under `key` if present and unexpired.
    ///
    /// A miss or an expired entry is a normal absence, not an error. A hit
    /// extends a sliding window, clamped by the absolute bound when present.
    /// Expired entries are evicted on observation and their hook runs.
    pub fn get(&self, key: &str) -> Option<V> {
        self.get_at(key, Utc::now())
    }

    /// Deterministic variant of [`get`](Self::get).
    pub fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<V> {
        let evicted = {
            let mut entries = self.entries.write();
            match entries.get_mut(key) {
                None => return None,
                Some(entry) if entry.expires_at > now => {
                    entry.expires_at = entry.policy.deadline_from(now);
                    return Some(entry.value.clone());
                }
                Some(_) => entries.remove_entry(key),
            }
        };

        // Hook runs outside the lock; re-entrant cache calls stay safe.
        if let Some((key, entry)) = evicted {
            self.notify_removed(&key, &entry.value);
        }
        None
    }

    /// Overwrite an existing entry and reset its expiration. Absent keys are
    /// left absent; returns whether the entry existed.
    pub fn renew(&self, key: &str, value: V, policy: Expiration) -> bool {
        self.renew_at(key, value, policy, Utc::now())
    }

    /// Deterministic variant of [`renew`](Self::renew).
    pub fn renew_at(&self, key: &str, value: V, policy: Expiration, now: DateTime<Utc>) -> bool {
        let mut entries = self.entries.write();
        match entries.get_mut(key) {
            Some(entry) => {
                *entry = Entry {
                    value,
                    policy,
                    expires_at: policy.deadline_from(now),
                };
                true
            }
            None => false,
        }
    }

    /// Delete the entry under `key` immediately. Idempotent.
    pub fn remove(&self, key: &str) {
        let evicted = self.entries.write().remove_entry(key);
        if let Some((key, entry)) = evicted {
            self.notify_removed(&key, &entry.value);
        }
    }

    /// Sweep every expired entry, running hooks for each.
    pub fn purge_expired(&self) {
        self.purge_expired_at(Utc::now());
    }

    /// Deterministic variant of [`purge_expired`](Self::purge_expired).
    pub fn purge_expired_at(&self, now: DateTime<Utc>) {
        let evicted: Vec<(String, Entry<V>)> = {
            let mut entries = self.entries.write();
            let dead: Vec<String> = entries
                .iter()
                .filter(|(_, e)| e.expires_at <= now)
                .map(|(k, _)| k.clone())
                .collect();
            dead.into_iter()
                .filter_map(|k| entries.remove_entry(&k))
                .collect()
        };
        for (key, entry) in &evicted {
            self.notify_removed(key, &entry.value);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn notify_removed(&self, key: &str, value: &V) {
        if let Some(hook) = &self.on_remove {
            hook(key, value);
        }
    }
}

impl<V: Clone> Default for MemoryCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
