//! Chart data

use axum::{
    Json, Router,
    extract::{Path, Query},
    routing::get,
};
use serde_json::Value;
use std::sync::Arc;

use shared::models::{
    ChartKind, ChartQuery, ProjectStatus, ResourceLoad, StatusSlice, TeamMember,
};
use shared::response::ApiResponse;

use super::seed;
use super::state::MockState;

pub fn router() -> Router<Arc<MockState>> {
    Router::new().route("/chart-data/{kind}", get(chart_data))
}

/// Status distribution, in dashboard legend order
pub(crate) fn status_distribution() -> Vec<StatusSlice> {
    let projects = seed::projects();
    [
        ProjectStatus::InProgress,
        ProjectStatus::Completed,
        ProjectStatus::Planned,
        ProjectStatus::Delayed,
    ]
    .into_iter()
    .map(|status| StatusSlice {
        name: status.label().to_string(),
        value: projects.iter().filter(|p| p.status == status).count() as u32,
    })
    .collect()
}

pub(crate) fn resource_allocation(members: &[TeamMember]) -> Vec<ResourceLoad> {
    members
        .iter()
        .map(|m| ResourceLoad {
            name: m.name.clone(),
            projects: m.project_count,
        })
        .collect()
}

/// GET /chart-data/{kind} - unknown kinds yield an empty list
async fn chart_data(
    Path(kind): Path<String>,
    Query(query): Query<ChartQuery>,
) -> Json<ApiResponse<Value>> {
    tracing::debug!(%kind, ?query, "Mock chart request");
    let series = match ChartKind::parse(&kind) {
        Some(ChartKind::ProgressTrends) => serde_json::to_value(seed::progress_trends()),
        Some(ChartKind::ProjectStatus) => serde_json::to_value(status_distribution()),
        Some(ChartKind::ResourceAllocation) => {
            serde_json::to_value(resource_allocation(&seed::team_members()))
        }
        None => Ok(Value::Array(Vec::new())),
    };
    Json(ApiResponse::ok(
        series.unwrap_or_else(|_| Value::Array(Vec::new())),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_distribution_matches_portfolio() {
        let slices = status_distribution();
        let values: Vec<u32> = slices.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![2, 1, 1, 1]);
        assert_eq!(slices[0].name, "In progress");
    }

    #[test]
    fn test_resource_allocation_counts() {
        let loads = resource_allocation(&seed::team_members());
        assert_eq!(loads.len(), 7);
        assert_eq!(loads[0].projects, 3);
    }
}
