//! Project Model

use serde::{Deserialize, Serialize};

/// Project lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Planned,
    InProgress,
    Completed,
    Delayed,
}

impl ProjectStatus {
    /// Wire name (`in-progress`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Delayed => "delayed",
        }
    }

    /// Dashboard label used by the status distribution chart
    pub fn label(&self) -> &'static str {
        match self {
            Self::Planned => "Planned",
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
            Self::Delayed => "Delayed",
        }
    }
}

/// Project entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub manager: String,
    /// Completion percentage (0-100)
    #[serde(default)]
    pub progress: u8,
    pub status: ProjectStatus,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub team: Vec<String>,
    #[serde(default)]
    pub budget: u64,
    #[serde(default)]
    pub spent: u64,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Create project payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCreate {
    pub name: String,
    #[serde(default)]
    pub manager: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub team: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
}

/// Update project payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spent: Option<u64>,
}

impl Project {
    /// Merge an update into this project
    pub fn apply(&mut self, update: ProjectUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(manager) = update.manager {
            self.manager = manager;
        }
        if let Some(progress) = update.progress {
            self.progress = progress.min(100);
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if update.deadline.is_some() {
            self.deadline = update.deadline;
        }
        if update.description.is_some() {
            self.description = update.description;
        }
        if let Some(team) = update.team {
            self.team = team;
        }
        if let Some(budget) = update.budget {
            self.budget = budget;
        }
        if let Some(spent) = update.spent {
            self.spent = spent;
        }
    }
}

/// Project list query
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectQuery {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

fn default_page_size() -> u32 {
    10
}

impl Default for ProjectQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: default_page_size(),
            status: None,
            department_id: None,
            keyword: None,
        }
    }
}

impl ProjectQuery {
    /// Query string pairs, omitting unset filters
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("size".to_string(), self.size.to_string()),
        ];
        if let Some(status) = self.status {
            pairs.push(("status".into(), status.as_str().into()));
        }
        if let Some(dept) = self.department_id.as_deref().filter(|d| !d.is_empty()) {
            pairs.push(("departmentId".into(), dept.into()));
        }
        if let Some(keyword) = self.keyword.as_deref().filter(|k| !k.is_empty()) {
            pairs.push(("keyword".into(), keyword.into()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&ProjectStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        let s: ProjectStatus = serde_json::from_str("\"delayed\"").unwrap();
        assert_eq!(s, ProjectStatus::Delayed);
    }

    #[test]
    fn test_apply_update_clamps_progress() {
        let mut project = Project {
            id: "1".into(),
            name: "Website".into(),
            manager: "Zhang San".into(),
            progress: 10,
            status: ProjectStatus::Planned,
            deadline: None,
            description: None,
            team: vec![],
            budget: 100,
            spent: 0,
            start_date: None,
            avatar: None,
        };
        project.apply(ProjectUpdate {
            progress: Some(140),
            status: Some(ProjectStatus::Completed),
            ..Default::default()
        });
        assert_eq!(project.progress, 100);
        assert_eq!(project.status, ProjectStatus::Completed);
        assert_eq!(project.name, "Website");
    }

    #[test]
    fn test_query_pairs_skip_empty() {
        let query = ProjectQuery {
            keyword: Some(String::new()),
            status: Some(ProjectStatus::Planned),
            ..Default::default()
        };
        let pairs = query.to_pairs();
        assert!(pairs.contains(&("status".into(), "planned".into())));
        assert!(!pairs.iter().any(|(k, _)| k == "keyword"));
    }

    #[test]
    fn test_default_query_matches_missing_fields() {
        let parsed: ProjectQuery = serde_json::from_str("{}").unwrap();
        let default = ProjectQuery::default();
        assert_eq!(default.size, 10);
        assert_eq!(parsed.size, default.size);
        assert_eq!(parsed.page, default.page);
        assert_eq!(
            default.to_pairs(),
            vec![
                ("page".to_string(), "0".to_string()),
                ("size".to_string(), "10".to_string())
            ]
        );
    }
}
