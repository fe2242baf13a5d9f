//! Per-request session lifecycle middleware.
//!
//! Explicit credentials always win over a session cookie, and a fresh
//! credential attempt flushes any prior session whatever its outcome.
//! Cookie-only requests restore the stored principal and renew the entry
//! after the downstream handler runs. A store miss is tolerated silently;
//! only an explicit authentication failure expires the cookie.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderValue, Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;

use gemstone_auth::{augment, Authenticator, ClaimProvider};
use gemstone_core::ClaimsIdentity;
use gemstone_session::{
    expired_cookie, session_cookie, token_from_cookie_header, SessionConfig, SessionStore,
    SessionTicket,
};

use crate::context::SessionContext;
use crate::errors::json_error;

/// Collaborators shared by every request.
#[derive(Clone)]
pub struct SessionState {
    pub store: Arc<SessionStore>,
    pub authenticator: Arc<dyn Authenticator>,
    pub provider: Arc<dyn ClaimProvider>,
}

pub async fn session_middleware(
    State(state): State<SessionState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let config = state.store.config().clone();

    let cookie_token = req
        .headers()
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| token_from_cookie_header(value, &config.cookie_name))
        .map(str::to_string);

    let credentials = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    match credentials {
        Some(credentials) => {
            with_credentials(&state, &config, cookie_token, &credentials, req, next).await
        }
        None => with_cookie(&state, cookie_token, req, next).await,
    }
}

async fn with_credentials(
    state: &SessionState,
    config: &SessionConfig,
    cookie_token: Option<String>,
    credentials: &str,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let identity = state.authenticator.authenticate(credentials);

    // A fresh credential attempt flushes the prior session regardless of
    // outcome; a stale ticket must not survive re-authentication.
    if let Some(token) = &cookie_token {
        state.store.remove(token);
    }

    match identity {
        Some(identity) => {
            let ticket = SessionTicket::snapshot(&session_identity(state, &identity));
            let token = match state.store.store(ticket.clone()) {
                Ok(token) => token,
                Err(error) => {
                    tracing::error!(%error, "session token issuance failed");
                    return json_error(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "session_unavailable",
                        "could not establish a session",
                    );
                }
            };

            req.extensions_mut()
                .insert(SessionContext::new(ticket.identity, Some(token.clone())));

            let mut response = next.run(req).await;
            set_cookie(&mut response, &session_cookie(config, &token, Utc::now()));
            response
        }
        None => {
            tracing::debug!("credential authentication failed");
            let mut response = next.run(req).await;
            if cookie_token.is_some() {
                // Fail closed: the rejected caller keeps neither the session
                // nor the cookie. No new cookie is ever issued on this path.
                set_cookie(&mut response, &expired_cookie(config));
            }
            response
        }
    }
}

async fn with_cookie(
    state: &SessionState,
    cookie_token: Option<String>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let Some(token) = cookie_token else {
        return next.run(req).await;
    };

    match state.store.retrieve(&token) {
        // A miss is distinct from a rejection: the entry may simply have
        // idled out, so the cookie is left alone.
        None => next.run(req).await,
        Some(ticket) => {
            req.extensions_mut().insert(SessionContext::new(
                ticket.identity.clone(),
                Some(token.clone()),
            ));

            let response = next.run(req).await;
            state.store.renew(&token, ticket);
            response
        }
    }
}

/// Session-scoped identity: the authenticated identity's claims merged with
/// whatever the claims runtime assigns to the account.
fn session_identity(state: &SessionState, identity: &ClaimsIdentity) -> ClaimsIdentity {
    let provider_name = identity.name().unwrap_or_default();
    let scheme = identity.scheme().unwrap_or("Session");
    let assigned = augment(identity, provider_name, state.provider.as_ref(), scheme);
    identity
        .clone()
        .with_claims(assigned.claims().iter().cloned())
}

fn set_cookie(response: &mut Response, cookie: &str) {
    if let Ok(value) = HeaderValue::from_str(cookie) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
}
