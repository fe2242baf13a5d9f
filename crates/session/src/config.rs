use chrono::Duration;
use thiserror::Error;

/// Default session cookie name (part of the wire contract).
pub const DEFAULT_COOKIE_NAME: &str = "x-gemstone-auth";

/// Default cookie base path.
pub const DEFAULT_BASE_PATH: &str = "/";

/// Cookie and expiration settings for the session subsystem.
///
/// The defaults form the de facto wire contract: cookie `x-gemstone-auth`,
/// path `/`, 15 minute sliding idle timeout, 24 hour absolute lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub base_path: String,
    /// Sliding idle timeout for store entries.
    pub idle_timeout: Duration,
    /// Absolute lifetime bounding both the cookie and the store entry.
    pub lifetime: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            idle_timeout: Duration::minutes(15),
            lifetime: Duration::hours(24),
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    pub fn with_base_path(mut self, path: impl Into<String>) -> Self {
        self.base_path = path.into();
        self
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// Reject configurations where the sliding idle timeout exceeds the
    /// absolute lifetime. A live cookie must never outlast every possible
    /// store entry refresh.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.idle_timeout > self.lifetime {
            return Err(ConfigError::IdleExceedsLifetime {
                idle_timeout: self.idle_timeout,
                lifetime: self.lifetime,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("idle timeout ({idle_timeout}) exceeds absolute lifetime ({lifetime})")]
    IdleExceedsLifetime {
        idle_timeout: Duration,
        lifetime: Duration,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_wire_contract() {
        let config = SessionConfig::default();
        assert_eq!(config.cookie_name, "x-gemstone-auth");
        assert_eq!(config.base_path, "/");
        assert_eq!(config.idle_timeout, Duration::minutes(15));
        assert_eq!(config.lifetime, Duration::hours(24));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn idle_timeout_longer_than_lifetime_is_rejected() {
        let config = SessionConfig::new()
            .with_idle_timeout(Duration::hours(48))
            .with_lifetime(Duration::hours(24));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::IdleExceedsLifetime { .. })
        ));
    }
}
