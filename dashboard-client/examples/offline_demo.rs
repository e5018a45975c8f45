// dashboard-client/examples/offline_demo.rs
// Sign in and browse the dashboard; falls back to mock data when the API is down

use dashboard_client::logging::init_logger;
use dashboard_client::{ClientConfig, DashboardClient, LoginRequest, SessionEvent};
use shared::models::{ChartQuery, ProjectQuery};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_logger();

    let args: Vec<String> = std::env::args().collect();
    let username = args.get(1).map(String::as_str).unwrap_or("admin");
    let password = args.get(2).map(String::as_str).unwrap_or("password");

    let client = DashboardClient::new(ClientConfig::from_env());
    let mut events = client.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                SessionEvent::Expired { path } => tracing::warn!(%path, "Session expired"),
                SessionEvent::ModeChanged { mode } => tracing::warn!(%mode, "Mode changed"),
                SessionEvent::TokenRotated => tracing::info!("Token rotated"),
            }
        }
    });

    if !client.health_check().await {
        tracing::warn!(base_url = %client.config().base_url, "API unreachable, using mock data");
    }

    let login = client
        .login(&LoginRequest::new(username, password))
        .await?;
    if let Some(login) = login.data {
        tracing::info!(user = %login.user.name, role = %login.user.role, "Signed in");
    }

    let projects = client.projects(&ProjectQuery::default()).await?;
    for project in projects.data.unwrap_or_default() {
        tracing::info!(
            id = %project.id,
            status = project.status.label(),
            progress = project.progress,
            "{}",
            project.name
        );
    }

    if let Some(stats) = client.project_statistics().await?.data {
        tracing::info!(?stats, "Portfolio statistics");
    }

    let slices = client
        .status_distribution(&ChartQuery::default())
        .await?
        .data
        .unwrap_or_default();
    for slice in slices {
        tracing::info!(status = %slice.name, count = slice.value, "Status distribution");
    }

    client.logout().await?;
    tracing::info!(mode = %client.mode(), "Done");
    Ok(())
}
