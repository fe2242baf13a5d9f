//! Route-level access-policy guard.
//!
//! Enforced before the handler runs, after the session middleware has
//! established the request identity.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use axum::Extension;

use gemstone_auth::{evaluate, AccessRegistry, PolicyDecision, ResourceDescriptor};

use crate::context::SessionContext;
use crate::errors::json_error;

#[derive(Clone)]
pub struct PolicyState {
    pub registry: Arc<AccessRegistry>,
}

/// Resource metadata attached to a protected route.
///
/// When no explicit action name is declared, the action falls back to the
/// structural name derived from the HTTP method ("Get", "Post", ...).
#[derive(Debug, Clone)]
pub struct ProtectedResource {
    pub resource: String,
    pub action: Option<String>,
}

/// Route layer declaring the resource name; the action is derived per
/// request from the HTTP method.
pub fn protect(resource: impl Into<String>) -> Extension<ProtectedResource> {
    Extension(ProtectedResource {
        resource: resource.into(),
        action: None,
    })
}

/// Route layer declaring both resource and action names.
pub fn protect_as(
    resource: impl Into<String>,
    action: impl Into<String>,
) -> Extension<ProtectedResource> {
    Extension(ProtectedResource {
        resource: resource.into(),
        action: Some(action.into()),
    })
}

pub async fn policy_middleware(
    State(state): State<PolicyState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(context) = req.extensions().get::<SessionContext>().cloned() else {
        return json_error(
            StatusCode::UNAUTHORIZED,
            "unauthenticated",
            "authentication required",
        );
    };

    let method = req.method().as_str().to_string();
    let descriptor = req.extensions().get::<ProtectedResource>().map(|r| {
        ResourceDescriptor::new(
            r.resource.clone(),
            r.action
                .clone()
                .unwrap_or_else(|| structural_action(&method)),
        )
    });

    match evaluate(context.identity(), descriptor.as_ref(), &method, &state.registry) {
        PolicyDecision::Allow => next.run(req).await,
        PolicyDecision::Deny { reason } => {
            tracing::debug!(%reason, "access denied");
            json_error(StatusCode::FORBIDDEN, "access_denied", reason)
        }
        // No opinion from the claims policy: default-deny.
        PolicyDecision::Indeterminate => {
            let reason = descriptor
                .map(|d| format!("Controller {} {}", d.resource, d.action))
                .unwrap_or_else(|| "unresolved resource metadata".to_string());
            json_error(StatusCode::FORBIDDEN, "access_denied", reason)
        }
    }
}

/// Structural action name for an HTTP method: "GET" -> "Get".
fn structural_action(method: &str) -> String {
    let lower = method.to_ascii_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => lower,
    }
}
