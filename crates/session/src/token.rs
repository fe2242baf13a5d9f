use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use thiserror::Error;

/// Opaque, client-held key referencing a stored ticket.
pub type SessionToken = String;

/// Bytes of OS entropy per token (1024 bits).
const TOKEN_BYTES: usize = 128;

/// The OS entropy source failed; no token can be issued safely.
#[derive(Debug, Error)]
#[error("OS entropy source unavailable: {0}")]
pub struct TokenError(#[from] getrandom::Error);

/// Generate a fresh session token: 128 random bytes from the OS CSPRNG,
/// base64url-encoded without padding.
///
/// Collisions are cryptographically negligible at this entropy, so tokens
/// are treated as unique and are never reused.
pub fn issue_token() -> Result<SessionToken, TokenError> {
    let mut buf = [0u8; TOKEN_BYTES];
    getrandom::getrandom(&mut buf)?;
    Ok(URL_SAFE_NO_PAD.encode(buf))
}
