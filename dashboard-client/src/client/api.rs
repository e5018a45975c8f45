// dashboard-client/src/client/api.rs
// Typed API facade: one method per dashboard endpoint

use serde::de::DeserializeOwned;
use serde_json::Value;

use shared::client::{
    CaptchaChallenge, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
    ResetPasswordCodeRequest, ResetPasswordRequest, UserInfo,
};
use shared::models::{
    AvatarResponse, ChartKind, ChartQuery, Department, DepartmentCreate, DepartmentUpdate,
    ProgressTrendPoint, Project, ProjectCreate, ProjectQuery, ProjectStatistics, ProjectUpdate,
    ResourceLoad, StatusSlice, TeamMember, UploadResponse, User, UserCreate, UserFilter,
    UserFilterResult, UserUpdate,
};
use shared::response::{ApiResponse, Page};

use super::DashboardClient;
use crate::ClientResult;
use crate::mock::seed;
use crate::operation::{Operation, Upload};

impl DashboardClient {
    async fn call<T: DeserializeOwned>(&self, op: Operation) -> ClientResult<ApiResponse<T>> {
        let envelope = self.dispatch(&op).await?;
        Ok(envelope.into_typed()?)
    }

    // ========== Auth ==========

    /// Sign in. The token is picked up from the response by the dispatcher;
    /// the returned profile is cached locally.
    pub async fn login(&self, req: &LoginRequest) -> ClientResult<ApiResponse<LoginResponse>> {
        let response: ApiResponse<LoginResponse> =
            self.call(Operation::post("/auth/login").json(req)?).await?;
        if let Some(login) = &response.data {
            self.session().set_user_info(&login.user)?;
            tracing::info!(username = %login.user.username, "Signed in");
        }
        Ok(response)
    }

    pub async fn register(
        &self,
        req: &RegisterRequest,
    ) -> ClientResult<ApiResponse<RegisterResponse>> {
        self.call(Operation::post("/auth/register").json(req)?).await
    }

    pub async fn captcha(&self) -> ClientResult<ApiResponse<CaptchaChallenge>> {
        self.call(Operation::get("/auth/captcha")).await
    }

    /// Sign out. Always succeeds locally: the session is cleared even when
    /// the remote call fails.
    pub async fn logout(&self) -> ClientResult<()> {
        if let Err(e) = self.dispatch(&Operation::post("/logout")).await {
            tracing::warn!(error = %e, "Remote logout failed, clearing local session anyway");
        }
        self.session().clear().await?;
        tracing::info!("Signed out");
        Ok(())
    }

    /// Current user profile
    ///
    /// A fetched profile replaces the cached one. Falls back to the cached
    /// profile, then to the default administrator profile, when the endpoint
    /// yields nothing. Authentication failures propagate.
    pub async fn user_info(&self) -> ClientResult<UserInfo> {
        match self.call::<UserInfo>(Operation::get("/auth/info")).await {
            Ok(ApiResponse {
                data: Some(info), ..
            }) => {
                self.session().set_user_info(&info)?;
                return Ok(info);
            }
            Ok(_) => {}
            Err(e) if e.is_auth() => return Err(e),
            Err(e) => tracing::warn!(error = %e, "Failed to fetch user info, using cache"),
        }
        Ok(self
            .session()
            .user_info()?
            .unwrap_or_else(seed::default_profile))
    }

    pub async fn send_reset_code(&self, email: &str) -> ClientResult<ApiResponse> {
        let req = ResetPasswordCodeRequest {
            email: email.to_string(),
        };
        self.call(Operation::post("/auth/reset-password/code").json(&req)?)
            .await
    }

    pub async fn reset_password(&self, req: &ResetPasswordRequest) -> ClientResult<ApiResponse> {
        self.call(Operation::post("/users/reset-password").json(req)?)
            .await
    }

    // ========== Projects ==========

    pub async fn projects(&self, query: &ProjectQuery) -> ClientResult<ApiResponse<Vec<Project>>> {
        self.call(Operation::get("/projects").query_pairs(query.to_pairs()))
            .await
    }

    /// Project by id; `data` is `None` for an unknown id
    pub async fn project(&self, id: &str) -> ClientResult<ApiResponse<Project>> {
        self.call(Operation::get(format!("/projects/{id}"))).await
    }

    pub async fn create_project(
        &self,
        project: &ProjectCreate,
    ) -> ClientResult<ApiResponse<Project>> {
        self.call(Operation::post("/projects").json(project)?).await
    }

    pub async fn update_project(
        &self,
        id: &str,
        update: &ProjectUpdate,
    ) -> ClientResult<ApiResponse<Project>> {
        self.call(Operation::put(format!("/projects/{id}")).json(update)?)
            .await
    }

    pub async fn delete_project(&self, id: &str) -> ClientResult<ApiResponse> {
        self.call(Operation::delete(format!("/projects/{id}"))).await
    }

    pub async fn project_statistics(&self) -> ClientResult<ApiResponse<ProjectStatistics>> {
        self.call(Operation::get("/projects/statistics/comprehensive"))
            .await
    }

    // ========== Team ==========

    pub async fn team_members(&self) -> ClientResult<ApiResponse<Vec<TeamMember>>> {
        self.call(Operation::get("/team-members")).await
    }

    /// Zero-based page of the team roster
    pub async fn team_page(
        &self,
        page: u32,
        size: u32,
    ) -> ClientResult<ApiResponse<Page<TeamMember>>> {
        self.call(
            Operation::get("/users/page")
                .query("page", page)
                .query("size", size),
        )
        .await
    }

    // ========== Users ==========

    pub async fn users(&self) -> ClientResult<ApiResponse<Vec<User>>> {
        self.call(Operation::get("/users")).await
    }

    pub async fn filter_users(
        &self,
        filter: &UserFilter,
    ) -> ClientResult<ApiResponse<UserFilterResult>> {
        self.call(Operation::post("/users/filter").json(filter)?)
            .await
    }

    pub async fn create_user(&self, user: &UserCreate) -> ClientResult<ApiResponse<User>> {
        self.call(Operation::post("/users").json(user)?).await
    }

    pub async fn update_user(
        &self,
        id: &str,
        update: &UserUpdate,
    ) -> ClientResult<ApiResponse<User>> {
        self.call(Operation::put(format!("/users/{id}")).json(update)?)
            .await
    }

    pub async fn delete_user(&self, id: &str) -> ClientResult<ApiResponse> {
        self.call(Operation::delete(format!("/users/{id}"))).await
    }

    /// Upload an avatar for the given user, or for the signed-in user
    pub async fn upload_avatar(
        &self,
        user_id: Option<&str>,
        file: Upload,
    ) -> ClientResult<ApiResponse<AvatarResponse>> {
        let path = match user_id {
            Some(id) => format!("/users/{id}/avatar"),
            None => "/users/avatar".to_string(),
        };
        self.call(Operation::post(path).upload(file)).await
    }

    pub async fn default_avatar(&self) -> ClientResult<ApiResponse<String>> {
        self.call(Operation::get("/users/default-avatar")).await
    }

    pub async fn upload(&self, file: Upload) -> ClientResult<ApiResponse<UploadResponse>> {
        self.call(Operation::post("/upload").upload(file)).await
    }

    // ========== Departments ==========

    pub async fn departments(&self) -> ClientResult<ApiResponse<Vec<Department>>> {
        self.call(Operation::get("/departments")).await
    }

    pub async fn department(&self, id: &str) -> ClientResult<ApiResponse<Department>> {
        self.call(Operation::get(format!("/departments/{id}"))).await
    }

    pub async fn create_department(
        &self,
        department: &DepartmentCreate,
    ) -> ClientResult<ApiResponse<Department>> {
        self.call(Operation::post("/departments").json(department)?)
            .await
    }

    pub async fn update_department(
        &self,
        id: &str,
        update: &DepartmentUpdate,
    ) -> ClientResult<ApiResponse<Department>> {
        self.call(Operation::put(format!("/departments/{id}")).json(update)?)
            .await
    }

    pub async fn delete_department(&self, id: &str) -> ClientResult<ApiResponse> {
        self.call(Operation::delete(format!("/departments/{id}")))
            .await
    }

    // ========== Charts ==========

    /// Raw chart series
    pub async fn chart_data(
        &self,
        kind: ChartKind,
        query: &ChartQuery,
    ) -> ClientResult<ApiResponse<Value>> {
        self.call(
            Operation::get(format!("/chart-data/{}", kind.as_str())).query_pairs(query.to_pairs()),
        )
        .await
    }

    pub async fn progress_trends(
        &self,
        query: &ChartQuery,
    ) -> ClientResult<ApiResponse<Vec<ProgressTrendPoint>>> {
        Ok(self
            .chart_data(ChartKind::ProgressTrends, query)
            .await?
            .into_typed()?)
    }

    pub async fn status_distribution(
        &self,
        query: &ChartQuery,
    ) -> ClientResult<ApiResponse<Vec<StatusSlice>>> {
        Ok(self
            .chart_data(ChartKind::ProjectStatus, query)
            .await?
            .into_typed()?)
    }

    pub async fn resource_allocation(
        &self,
        query: &ChartQuery,
    ) -> ClientResult<ApiResponse<Vec<ResourceLoad>>> {
        Ok(self
            .chart_data(ChartKind::ResourceAllocation, query)
            .await?
            .into_typed()?)
    }
}
