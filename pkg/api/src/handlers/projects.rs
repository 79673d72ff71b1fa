use axum::{
    Json,
    extract::{Path as AxumPath, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use tracing::{info, warn};

use crate::AppState;
use pkg_constants::state::PROJECT_PREFIX;
use pkg_types::project::Project;
use pkg_types::validate::validate_name;

pub async fn create_project(
    State(state): State<AppState>,
    Json(mut project): Json<Project>,
) -> impl IntoResponse {
    if let Err(e) = validate_name(&project.name) {
        return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
    }

    let key = format!("{PROJECT_PREFIX}{}", project.name);
    match state.store.get_json::<Project>(&key).await {
        Ok(Some(_)) => {
            return (StatusCode::CONFLICT, "Project already exists").into_response();
        }
        Ok(None) => {}
        Err(e) => {
            warn!("Failed to check for existing project: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    }

    project.created_at = Utc::now();
    if let Err(e) = state.store.put_json(&key, &project).await {
        warn!("Failed to create project: {}", e);
        return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create project").into_response();
    }
    info!("Created project: {}", project.name);
    (StatusCode::CREATED, Json(project)).into_response()
}

pub async fn list_projects(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.list_prefix_json::<Project>(PROJECT_PREFIX).await {
        Ok(projects) => (StatusCode::OK, Json(projects)).into_response(),
        Err(e) => {
            warn!("Failed to list projects: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn get_project(
    State(state): State<AppState>,
    AxumPath(name): AxumPath<String>,
) -> impl IntoResponse {
    let key = format!("{PROJECT_PREFIX}{name}");
    match state.store.get_json::<Project>(&key).await {
        Ok(Some(project)) => (StatusCode::OK, Json(project)).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            warn!("Failed to load project {}: {}", name, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
