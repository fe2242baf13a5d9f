//! `gemstone-auth`: pure authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage.

pub mod access;
pub mod augment;
pub mod authenticate;
pub mod policy;

pub use access::{AccessLevel, AccessRegistry, ResourceDescriptor};
pub use augment::{augment, ClaimProvider};
pub use authenticate::{Authenticator, BasicAuthenticator, BASIC_SCHEME};
pub use policy::{evaluate, PolicyDecision};
