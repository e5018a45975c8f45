//! User Model

use serde::{Deserialize, Serialize};

/// Role name of the built-in administrator
pub const ROLE_ADMIN: &str = "admin";
/// Default role for new accounts
pub const ROLE_USER: &str = "user";

/// User account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub create_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

fn default_role() -> String {
    ROLE_USER.to_string()
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.username == ROLE_ADMIN
    }
}

/// Create user payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl UserCreate {
    /// Trim the free-text fields the way the dashboard forms submit them
    pub fn normalized(mut self) -> Self {
        self.username = self.username.trim().to_string();
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_string();
        self
    }
}

/// Update user payload
///
/// Blank passwords are dropped before sending.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UserUpdate {
    pub fn normalized(mut self) -> Self {
        self.username = self.username.map(|u| u.trim().to_string());
        self.name = self.name.map(|n| n.trim().to_string());
        self.email = self.email.map(|e| e.trim().to_string());
        self.password = self
            .password
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        self
    }
}

impl User {
    /// Merge an update into this user. The administrator keeps its
    /// username and role.
    pub fn apply(&mut self, mut update: UserUpdate) {
        if self.is_admin() {
            update.username = None;
            update.role = None;
        }
        if let Some(username) = update.username.filter(|u| !u.is_empty()) {
            self.username = username;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        if update.department.is_some() {
            self.department = update.department;
        }
        if update.department_id.is_some() {
            self.department_id = update.department_id;
        }
        if update.phone.is_some() {
            self.phone = update.phone;
        }
        if update.is_active.is_some() {
            self.is_active = update.is_active;
        }
    }
}

/// User filter criteria; unset fields do not filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    /// Case-insensitive substring of the username
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        fn set(v: &Option<String>) -> Option<&str> {
            v.as_deref().filter(|s| !s.is_empty())
        }

        if let Some(dept) = set(&self.department_id)
            && user.department_id.as_deref() != Some(dept)
        {
            return false;
        }
        if let Some(keyword) = set(&self.username)
            && !user
                .username
                .to_lowercase()
                .contains(&keyword.to_lowercase())
        {
            return false;
        }
        if let Some(email) = set(&self.email)
            && user.email != email
        {
            return false;
        }
        if let Some(phone) = set(&self.phone)
            && user.phone.as_deref() != Some(phone)
        {
            return false;
        }
        if let Some(role) = set(&self.role)
            && user.role != role.to_lowercase()
        {
            return false;
        }
        if let Some(active) = self.is_active
            && user.is_active != Some(active)
        {
            return false;
        }
        true
    }
}

/// Filter result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilterResult {
    pub items: Vec<User>,
    pub total: usize,
}
