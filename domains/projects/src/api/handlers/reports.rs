//! Portfolio report handler

use axum::{extract::State, Json};
use portfolio_common::Result;

use crate::api::middleware::ProjectsState;
use crate::domain::report::{self, PortfolioReport};

/// Aggregate report over every project
///
/// **GET /v1/reports/portfolio**
pub async fn get_portfolio_report(
    State(state): State<ProjectsState>,
) -> Result<Json<PortfolioReport>> {
    let mut conn = state.repos.acquire().await?;
    let report = report::generate_portfolio_report(&mut *conn).await?;
    Ok(Json(report))
}
