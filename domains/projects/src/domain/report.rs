//! Portfolio report
//!
//! Aggregates over every project: count and budget per status, the average
//! duration of completed projects, and the number of distinct staff members
//! assigned anywhere.

use std::collections::BTreeMap;

use async_trait::async_trait;
use portfolio_common::Result;
use rust_decimal::Decimal;
use serde::Serialize;

use super::entities::ProjectStatus;

/// Read-only aggregates backing the portfolio report
#[async_trait]
pub trait ReportSource: Send {
    /// Project count per status; statuses without projects may be omitted
    async fn count_by_status(&mut self) -> Result<Vec<(ProjectStatus, i64)>>;

    /// Summed total budget per status; statuses without projects may be omitted
    async fn budget_by_status(&mut self) -> Result<Vec<(ProjectStatus, Decimal)>>;

    /// Mean of `actual_end_date - start_date` in days over completed projects
    /// that have an actual end date, `None` when there are none
    async fn average_completed_duration_days(&mut self) -> Result<Option<f64>>;

    /// Distinct staff members assigned to at least one project
    async fn count_distinct_staff(&mut self) -> Result<i64>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioReport {
    pub projects_by_status: BTreeMap<ProjectStatus, i64>,
    pub budget_by_status: BTreeMap<ProjectStatus, Decimal>,
    pub average_duration_days: f64,
    pub unique_staff_count: i64,
}

/// Build the portfolio report
pub async fn generate_portfolio_report<S>(source: &mut S) -> Result<PortfolioReport>
where
    S: ReportSource + ?Sized,
{
    let projects_by_status = source.count_by_status().await?.into_iter().collect();
    let budget_by_status = source.budget_by_status().await?.into_iter().collect();
    let average_duration_days = source
        .average_completed_duration_days()
        .await?
        .unwrap_or(0.0);
    let unique_staff_count = source.count_distinct_staff().await?;

    tracing::debug!(unique_staff_count, average_duration_days, "Portfolio report generated");

    Ok(PortfolioReport {
        projects_by_status,
        budget_by_status,
        average_duration_days,
        unique_staff_count,
    })
}
