//! `gemstone-web`: axum integration for the session and policy subsystem.
//!
//! Layering per request: the session middleware wraps every route and
//! establishes the effective identity (from credentials or a session
//! cookie); the policy guard wraps protected routes and gates them on the
//! identity's claims.

pub mod app;
pub mod context;
pub mod errors;
pub mod guard;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::build_app;
pub use context::SessionContext;
pub use guard::{protect, protect_as, PolicyState, ProtectedResource};
pub use middleware::{session_middleware, SessionState};
