//! HTTP routes: health, identity echo, session logout, and the demo
//! protected resource.

use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde_json::json;

use gemstone_session::{expired_cookie, token_from_cookie_header};

use crate::context::SessionContext;
use crate::errors::json_error;
use crate::guard::{self, protect, protect_as, PolicyState};
use crate::middleware::SessionState;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Echo the effective identity (requires an established session or
/// credentials, but no particular access level).
pub async fn whoami(context: Option<Extension<SessionContext>>) -> Response {
    let Some(Extension(context)) = context else {
        return json_error(
            StatusCode::UNAUTHORIZED,
            "unauthenticated",
            "authentication required",
        );
    };

    Json(json!({
        "name": context.identity().name(),
        "scheme": context.identity().scheme(),
        "claims": context.identity().claims(),
    }))
    .into_response()
}

/// Remove the caller's session and expire the cookie.
///
/// Never issues a new cookie, even when the request carried none.
pub async fn logout(State(state): State<SessionState>, headers: HeaderMap) -> Response {
    let config = state.store.config();
    let token = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| token_from_cookie_header(value, &config.cookie_name))
        .map(str::to_string);

    let mut response = StatusCode::NO_CONTENT.into_response();
    if let Some(token) = token {
        state.store.remove(&token);
        if let Ok(value) = HeaderValue::from_str(&expired_cookie(config)) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
    response
}

/// Demo protected resource. The collection routes derive their action from
/// the HTTP method; purge declares an explicit action so the registry can
/// gate it to admins.
///
/// Layer order matters: the `protect` extension must sit outside the guard
/// so the resource metadata is on the request before the guard reads it.
pub fn widgets_router(policy: PolicyState) -> Router {
    let collection = Router::new()
        .route("/widgets", get(list_widgets).post(create_widget))
        .route_layer(axum::middleware::from_fn_with_state(
            policy.clone(),
            guard::policy_middleware,
        ))
        .route_layer(protect("Widgets"));

    let purge = Router::new()
        .route("/widgets/purge", post(purge_widgets))
        .route_layer(axum::middleware::from_fn_with_state(
            policy,
            guard::policy_middleware,
        ))
        .route_layer(protect_as("Widgets", "Purge"));

    collection.merge(purge)
}

async fn list_widgets() -> Json<serde_json::Value> {
    Json(json!({ "widgets": ["anvil", "sprocket"] }))
}

async fn create_widget() -> StatusCode {
    StatusCode::CREATED
}

async fn purge_widgets() -> StatusCode {
    StatusCode::NO_CONTENT
}
