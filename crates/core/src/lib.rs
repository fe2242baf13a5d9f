//! `gemstone-core`: claims and identity primitives.
//!
//! This crate contains **pure domain** types (no transport or storage concerns).

pub mod claim;
pub mod identity;

pub use claim::{claim_types, Claim};
pub use identity::ClaimsIdentity;
