//! `gemstone-session`: session tickets, tokens, and the expiring store.
//!
//! Server-side half of the session contract: opaque random tokens issued to
//! clients reference identity snapshots held in an expiring in-memory cache.

pub mod cache;
pub mod config;
pub mod cookie;
pub mod store;
pub mod ticket;
pub mod token;

pub use cache::{Expiration, MemoryCache};
pub use config::{ConfigError, SessionConfig, DEFAULT_BASE_PATH, DEFAULT_COOKIE_NAME};
pub use cookie::{expired_cookie, session_cookie, token_from_cookie_header};
pub use store::SessionStore;
pub use ticket::{SessionTicket, SESSION_ROLE};
pub use token::{issue_token, SessionToken, TokenError};
