//! Seed data for the mock world

use rand::Rng;

use shared::client::UserInfo;
use shared::models::{
    Department, MemberSnapshot, Project, ProjectStatus, ProgressTrendPoint, ROLE_ADMIN, ROLE_USER,
    TeamMember, User,
};

pub const DEFAULT_AVATAR_URL: &str = "https://cdn.example.com/avatars/default.png";
pub const UPLOADED_AVATAR_URL: &str = "https://cdn.example.com/avatars/uploaded.png";
pub const UPLOAD_BASE_URL: &str = "https://cdn.example.com/uploads";
pub const PROJECT_AVATAR: &str = "data:image/svg+xml;base64,PHN2ZyB4bWxucz0iaHR0cDovL3d3dy53My5vcmcvMjAwMC9zdmciIHZpZXdCb3g9IjAgMCAxMDAgMTAwIj48cmVjdCB3aWR0aD0iMTAwIiBoZWlnaHQ9IjEwMCIgZmlsbD0iI0ZFRkJCQiIvPjwvc3ZnPg==";

/// Password accepted for both built-in accounts
pub const MOCK_PASSWORD: &str = "password";

/// Built-in login accounts
pub fn login_profile(username: &str) -> Option<UserInfo> {
    let (id, name) = match username {
        "admin" => ("1", "Administrator"),
        "user" => ("2", "Regular User"),
        _ => return None,
    };
    Some(UserInfo {
        id: id.into(),
        username: username.into(),
        name: name.into(),
        email: format!("{username}@example.com"),
        role: if username == "admin" { ROLE_ADMIN } else { ROLE_USER }.into(),
        avatar: Some(DEFAULT_AVATAR_URL.into()),
        create_time: None,
    })
}

/// Profile returned by `/auth/info` when nothing is cached
pub fn default_profile() -> UserInfo {
    UserInfo {
        id: "1".into(),
        username: "admin".into(),
        name: "System Administrator".into(),
        email: "admin@example.com".into(),
        role: ROLE_ADMIN.into(),
        avatar: Some(DEFAULT_AVATAR_URL.into()),
        create_time: Some("2023-01-01 10:00:00".into()),
    }
}

pub fn users() -> Vec<User> {
    [
        ("1", "admin", "Administrator", ROLE_ADMIN, "2023-01-01 00:00:00"),
        ("2", "user", "Regular User", ROLE_USER, "2023-01-02 00:00:00"),
        ("3", "test1", "Test User 1", ROLE_USER, "2023-01-03 00:00:00"),
        ("4", "test2", "Test User 2", ROLE_USER, "2023-01-04 00:00:00"),
    ]
    .into_iter()
    .map(|(id, username, name, role, created)| User {
        id: id.into(),
        username: username.into(),
        name: name.into(),
        email: format!("{username}@example.com"),
        role: role.into(),
        create_time: created.into(),
        department_id: None,
        department: None,
        phone: None,
        is_active: None,
        avatar: None,
    })
    .collect()
}

fn member(id: &str, name: &str, position: &str) -> MemberSnapshot {
    MemberSnapshot {
        id: id.into(),
        name: name.into(),
        position: position.into(),
    }
}

pub fn departments() -> Vec<Department> {
    vec![
        Department {
            id: "1".into(),
            name: "Engineering".into(),
            description: "Product development and technical innovation".into(),
            manager_id: "1".into(),
            manager: Some(member("1", "Zhang San", "Project Manager")),
            members: vec![
                member("1", "Zhang San", "Project Manager"),
                member("2", "Li Si", "Frontend Developer"),
                member("3", "Wang Wu", "Backend Developer"),
                member("6", "Sun Ba", "QA Engineer"),
                member("7", "Zhou Jiu", "Operations Engineer"),
            ],
        },
        Department {
            id: "2".into(),
            name: "Design".into(),
            description: "UI/UX design and product prototypes".into(),
            manager_id: "4".into(),
            manager: Some(member("4", "Zhao Liu", "UI Designer")),
            members: vec![member("4", "Zhao Liu", "UI Designer")],
        },
        Department {
            id: "3".into(),
            name: "Product".into(),
            description: "Product planning and requirements analysis".into(),
            manager_id: "5".into(),
            manager: Some(member("5", "Qian Qi", "Product Manager")),
            members: vec![member("5", "Qian Qi", "Product Manager")],
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn project(
    id: &str,
    name: &str,
    manager: &str,
    progress: u8,
    status: ProjectStatus,
    start: &str,
    deadline: &str,
    description: &str,
    team: [&str; 3],
    budget: u64,
    spent: u64,
) -> Project {
    Project {
        id: id.into(),
        name: name.into(),
        manager: manager.into(),
        progress,
        status,
        deadline: Some(deadline.into()),
        description: Some(description.into()),
        team: team.iter().map(|m| m.to_string()).collect(),
        budget,
        spent,
        start_date: Some(start.into()),
        avatar: Some(PROJECT_AVATAR.into()),
    }
}

/// Fixed project portfolio
pub fn projects() -> Vec<Project> {
    vec![
        project(
            "1",
            "Corporate Website Rebuild",
            "Zhang San",
            75,
            ProjectStatus::InProgress,
            "2023-10-01",
            "2023-12-31",
            "Full rebuild of the corporate website, covering frontend design and backend optimisation.",
            ["Zhang San", "Li Si", "Wang Wu"],
            200_000,
            150_000,
        ),
        project(
            "2",
            "Mobile App Development",
            "Li Si",
            45,
            ProjectStatus::InProgress,
            "2023-11-01",
            "2024-02-15",
            "Cross-platform mobile application for iOS and Android.",
            ["Li Si", "Zhao Liu", "Qian Qi"],
            300_000,
            135_000,
        ),
        project(
            "3",
            "Data Analytics Platform",
            "Wang Wu",
            100,
            ProjectStatus::Completed,
            "2023-09-01",
            "2023-11-20",
            "Enterprise analytics platform with real-time processing and visualisation.",
            ["Wang Wu", "Sun Ba", "Zhou Jiu"],
            150_000,
            145_000,
        ),
        project(
            "4",
            "Customer Relationship Management",
            "Zhao Liu",
            20,
            ProjectStatus::Planned,
            "2023-12-01",
            "2024-03-30",
            "CRM system streamlining customer service and sales management.",
            ["Zhao Liu", "Qian Qi", "Sun Ba"],
            180_000,
            36_000,
        ),
        project(
            "5",
            "Internal Collaboration Platform",
            "Sun Ba",
            30,
            ProjectStatus::Delayed,
            "2023-10-15",
            "2023-12-15",
            "Internal collaboration platform improving team communication.",
            ["Sun Ba", "Zhou Jiu", "Wu Shi"],
            120_000,
            50_000,
        ),
    ]
}

/// (id, name, position, email user, project count, base workload)
const ROSTER: [(&str, &str, &str, &str, u32, u8); 7] = [
    ("1", "Zhang San", "Project Manager", "zhangsan", 3, 80),
    ("2", "Li Si", "Frontend Developer", "lisi", 2, 65),
    ("3", "Wang Wu", "Backend Developer", "wangwu", 3, 85),
    ("4", "Zhao Liu", "UI Designer", "zhaoliu", 2, 60),
    ("5", "Qian Qi", "Product Manager", "qianqi", 3, 75),
    ("6", "Sun Ba", "QA Engineer", "sunba", 2, 70),
    ("7", "Zhou Jiu", "Operations Engineer", "zhoujiu", 2, 55),
];

/// Maximum deviation applied to a member's base workload
pub const WORKLOAD_JITTER: i16 = 5;

/// Team roster. Workload is the only randomised field.
pub fn team_members() -> Vec<TeamMember> {
    let mut rng = rand::thread_rng();
    ROSTER
        .iter()
        .map(|&(id, name, position, mail, projects, workload)| {
            let jitter = rng.gen_range(-WORKLOAD_JITTER..=WORKLOAD_JITTER);
            TeamMember {
                id: id.into(),
                name: name.into(),
                position: position.into(),
                email: format!("{mail}@example.com"),
                project_count: projects,
                workload: (workload as i16 + jitter).clamp(0, 100) as u8,
                avatar: Some(DEFAULT_AVATAR_URL.into()),
            }
        })
        .collect()
}

/// Roster entry as a department snapshot
pub fn roster_snapshot(id: &str) -> Option<MemberSnapshot> {
    ROSTER
        .iter()
        .find(|entry| entry.0 == id)
        .map(|&(id, name, position, ..)| member(id, name, position))
}

/// Base workload of a roster member
pub fn base_workload(id: &str) -> Option<u8> {
    ROSTER.iter().find(|entry| entry.0 == id).map(|entry| entry.5)
}

pub fn progress_trends() -> Vec<ProgressTrendPoint> {
    [
        ("Oct", 1, 2, 0),
        ("Nov", 2, 1, 0),
        ("Dec", 0, 2, 1),
        ("Jan", 0, 2, 1),
        ("Feb", 0, 1, 1),
        ("Mar", 0, 0, 1),
    ]
    .into_iter()
    .map(|(month, completed, in_progress, delayed)| ProgressTrendPoint {
        month: month.into(),
        completed,
        in_progress,
        delayed,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_workload_within_jitter() {
        for member in team_members() {
            let base = base_workload(&member.id).unwrap() as i16;
            assert!((member.workload as i16 - base).abs() <= WORKLOAD_JITTER);
        }
    }

    #[test]
    fn test_seed_ids_unique() {
        let users = users();
        let mut ids: Vec<_> = users.iter().map(|u| u.id.as_str()).collect();
        ids.dedup();
        assert_eq!(ids.len(), users.len());
        assert_eq!(projects().len(), 5);
        assert_eq!(departments().len(), 3);
    }

    #[test]
    fn test_login_profiles() {
        assert_eq!(login_profile("admin").unwrap().role, ROLE_ADMIN);
        assert_eq!(login_profile("user").unwrap().id, "2");
        assert!(login_profile("test1").is_none());
    }
}
