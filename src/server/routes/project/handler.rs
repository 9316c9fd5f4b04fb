use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::types::project::ProjectName;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    pub name: ProjectName,
    /// Ticker this project migrates into, absent for the new tickers.
    pub converts_to: Option<ProjectName>,
    pub legacy: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectsResponse {
    pub projects: Vec<ProjectInfo>,
}

/// List migration projects and their conversions
#[utoipa::path(
    get,
    path = "/projects",
    responses(
        (status = 200, description = "All known projects", body = ProjectsResponse)
    ),
    tag = "Projects"
)]
pub async fn get_projects() -> Json<ProjectsResponse> {
    let projects = ProjectName::ALL
        .into_iter()
        .map(|name| ProjectInfo {
            name,
            converts_to: name.converts_to(),
            legacy: name.is_legacy(),
        })
        .collect();
    Json(ProjectsResponse { projects })
}
