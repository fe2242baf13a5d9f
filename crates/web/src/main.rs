use std::sync::Arc;

use gemstone_auth::{AccessLevel, AccessRegistry, BasicAuthenticator, ClaimProvider};
use gemstone_core::Claim;
use gemstone_session::{SessionConfig, SessionStore};
use gemstone_web::SessionState;

/// Demo claims runtime: every account gets the same fixed grants.
struct StaticClaims(Vec<Claim>);

impl ClaimProvider for StaticClaims {
    fn claims_for(&self, _provider_name: &str) -> Vec<Claim> {
        self.0.clone()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    gemstone_web::telemetry::init();

    let config = SessionConfig::default();
    config.validate()?;

    let user = std::env::var("GEMSTONE_USER").unwrap_or_else(|_| "admin".to_string());
    let password = std::env::var("GEMSTONE_PASSWORD").unwrap_or_else(|_| {
        tracing::warn!("GEMSTONE_PASSWORD not set; using insecure dev default");
        "admin".to_string()
    });

    let session = SessionState {
        store: Arc::new(SessionStore::new(config)),
        authenticator: Arc::new(BasicAuthenticator::new().with_user(user, password, [])),
        provider: Arc::new(StaticClaims(vec![Claim::role("Admin")])),
    };

    let registry = AccessRegistry::new().declare("Widgets", "Purge", [AccessLevel::Admin]);
    let app = gemstone_web::build_app(session, registry);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
