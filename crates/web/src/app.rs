//! Router wiring (public entrypoint used by `main.rs` and the tests).

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use gemstone_auth::AccessRegistry;

use crate::guard::PolicyState;
use crate::middleware::{self, SessionState};
use crate::routes;

/// Build the full HTTP router.
///
/// The session middleware wraps every route; the policy guard is attached
/// per protected route group inside `widgets_router`, under its resource
/// metadata layer.
pub fn build_app(session: SessionState, registry: AccessRegistry) -> Router {
    let policy = PolicyState {
        registry: Arc::new(registry),
    };

    let protected = routes::widgets_router(policy);

    let session_routes = Router::new()
        .route("/logout", post(routes::logout))
        .with_state(session.clone());

    Router::new()
        .route("/health", get(routes::health))
        .route("/whoami", get(routes::whoami))
        .merge(protected)
        .merge(session_routes)
        .layer(axum::middleware::from_fn_with_state(
            session,
            middleware::session_middleware,
        ))
}
