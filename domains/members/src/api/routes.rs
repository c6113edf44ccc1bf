//! Route definitions for the members domain API

use axum::{routing::get, Router};

use super::handlers::members;
use super::middleware::MembersState;

/// Create all members domain API routes
pub fn routes() -> Router<MembersState> {
    Router::new()
        .route(
            "/v1/members",
            get(members::list_members).post(members::create_member),
        )
        .route("/v1/members/{id}", get(members::get_member))
}
