//! Session cookie building and parsing.
//!
//! Cookie attribute contract: HttpOnly, Secure, Path = configured base path,
//! Expires = now + configured lifetime (RFC 7231 IMF-fixdate). The cookie's
//! absolute expiry is independent of the store's own sliding expiration.

use chrono::{DateTime, Utc};

use crate::config::SessionConfig;

const EPOCH_EXPIRES: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// `Expires` attribute formatter (IMF-fixdate, always GMT).
fn imf_fixdate(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// `Set-Cookie` value installing the session token.
pub fn session_cookie(config: &SessionConfig, token: &str, now: DateTime<Utc>) -> String {
    format!(
        "{}={}; Path={}; Expires={}; Secure; HttpOnly",
        config.cookie_name,
        token,
        config.base_path,
        imf_fixdate(now + config.lifetime),
    )
}

/// `Set-Cookie` value removing the session cookie: empty value, epoch
/// expiry, same attributes so user agents match the original cookie.
pub fn expired_cookie(config: &SessionConfig) -> String {
    format!(
        "{}=; Path={}; Expires={}; Secure; HttpOnly",
        config.cookie_name, config.base_path, EPOCH_EXPIRES,
    )
}

/// Extract the named cookie's value from a `Cookie` request header.
pub fn token_from_cookie_header<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}
