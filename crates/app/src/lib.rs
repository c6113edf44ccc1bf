//! Portfolio application composition root
//!
//! Composes all domain routers into a single application.

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::Router;
use portfolio_common::Config;
use portfolio_members::{MembersRepositories, MembersState};
use portfolio_projects::{ProjectsRepositories, ProjectsState};
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Largest accepted request body
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Create the main application router with all routes and middleware
pub fn create_app(config: &Config, pool: PgPool) -> Router {
    let members_state = MembersState {
        repos: MembersRepositories::new(pool.clone()),
    };
    let projects_state = ProjectsState {
        repos: ProjectsRepositories::new(pool),
    };

    // Compose domain routers with shared infrastructure routes
    Router::new()
        .route("/health", axum::routing::get(health_check))
        .route(
            "/",
            axum::routing::get(|| async {
                concat!("Portfolio API v", env!("CARGO_PKG_VERSION"))
            }),
        )
        .merge(portfolio_members::routes().with_state(members_state))
        .merge(portfolio_projects::routes().with_state(projects_state))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(build_cors_layer(config.cors_allowed_origins.as_deref()))
}

/// CORS policy: permissive when no origins are configured, otherwise the
/// listed origins only. Origins that are not valid header values are skipped.
pub fn build_cors_layer(origins: Option<&[String]>) -> CorsLayer {
    let Some(origins) = origins else {
        return CorsLayer::permissive();
    };

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
