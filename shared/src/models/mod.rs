//! Dashboard entity models
//!
//! Wire format is camelCase JSON, shared by the live backend and the mock engine.

pub mod department;
pub mod project;
pub mod statistics;
pub mod team;
pub mod upload;
pub mod user;

pub use department::{Department, DepartmentCreate, DepartmentUpdate, MemberSnapshot};
pub use project::{Project, ProjectCreate, ProjectQuery, ProjectStatus, ProjectUpdate};
pub use statistics::{
    ChartKind, ChartQuery, ProgressTrendPoint, ProjectStatistics, ResourceLoad, StatusSlice,
};
pub use team::TeamMember;
pub use upload::{AvatarResponse, UploadResponse};
pub use user::{ROLE_ADMIN, ROLE_USER, User, UserCreate, UserFilter, UserFilterResult, UserUpdate};
