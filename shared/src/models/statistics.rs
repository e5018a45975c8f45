//! Dashboard statistics and chart series

use serde::{Deserialize, Serialize};

use super::project::{Project, ProjectStatus};

/// Portfolio statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStatistics {
    pub total_projects: u32,
    pub completed_projects: u32,
    pub in_progress_projects: u32,
    pub planned_projects: u32,
    pub delayed_projects: u32,
    pub total_budget: u64,
    pub total_spent: u64,
    /// Mean progress, rounded to the nearest integer
    pub avg_progress: u32,
}

impl ProjectStatistics {
    pub fn from_projects(projects: &[Project]) -> Self {
        let count = |status| projects.iter().filter(|p| p.status == status).count() as u32;
        let progress_sum: u32 = projects.iter().map(|p| p.progress as u32).sum();
        let avg_progress = if projects.is_empty() {
            0
        } else {
            (progress_sum as f64 / projects.len() as f64).round() as u32
        };

        Self {
            total_projects: projects.len() as u32,
            completed_projects: count(ProjectStatus::Completed),
            in_progress_projects: count(ProjectStatus::InProgress),
            planned_projects: count(ProjectStatus::Planned),
            delayed_projects: count(ProjectStatus::Delayed),
            total_budget: projects.iter().map(|p| p.budget).sum(),
            total_spent: projects.iter().map(|p| p.spent).sum(),
            avg_progress,
        }
    }
}

/// Chart identifiers accepted by `/chart-data/{type}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    ProgressTrends,
    ProjectStatus,
    ResourceAllocation,
}

impl ChartKind {
    /// Parse either the kebab-case or the camelCase spelling
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "progress-trends" | "progressTrend" => Some(Self::ProgressTrends),
            "project-status" | "projectStatus" => Some(Self::ProjectStatus),
            "resource-allocation" | "resourceAllocation" => Some(Self::ResourceAllocation),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProgressTrends => "progress-trends",
            Self::ProjectStatus => "project-status",
            Self::ResourceAllocation => "resource-allocation",
        }
    }
}

/// Optional chart filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range_type: Option<String>,
}

impl ChartQuery {
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        [
            ("projectId", &self.project_id),
            ("startDate", &self.start_date),
            ("endDate", &self.end_date),
            ("dateRangeType", &self.date_range_type),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.as_ref().map(|v| (k.to_string(), v.clone())))
        .collect()
    }
}

/// Monthly progress trend point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressTrendPoint {
    pub month: String,
    pub completed: u32,
    pub in_progress: u32,
    pub delayed: u32,
}

/// Status distribution slice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSlice {
    pub name: String,
    pub value: u32,
}

/// Projects assigned per person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceLoad {
    pub name: String,
    pub projects: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_kind_aliases() {
        assert_eq!(
            ChartKind::parse("progressTrend"),
            Some(ChartKind::ProgressTrends)
        );
        assert_eq!(
            ChartKind::parse("resource-allocation"),
            Some(ChartKind::ResourceAllocation)
        );
        assert_eq!(ChartKind::parse("burndown"), None);
    }

    #[test]
    fn test_statistics_empty() {
        let stats = ProjectStatistics::from_projects(&[]);
        assert_eq!(stats.total_projects, 0);
        assert_eq!(stats.avg_progress, 0);
    }

    #[test]
    fn test_chart_query_pairs() {
        let q = ChartQuery {
            start_date: Some("2023-10-01".into()),
            ..Default::default()
        };
        assert_eq!(
            q.to_pairs(),
            vec![("startDate".to_string(), "2023-10-01".to_string())]
        );
    }
}
