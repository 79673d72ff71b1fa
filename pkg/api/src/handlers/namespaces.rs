use axum::{
    Json,
    extract::{Path as AxumPath, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::AppState;
use crate::store::RegistryReads;
use pkg_constants::state::NAMESPACE_PREFIX;
use pkg_quota::{AdmissionError, Operation, validate_namespace_quota};
use pkg_types::namespace::Namespace;
use pkg_types::validate::validate_name;

/// Query parameters for listing namespaces.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub project: Option<String>,
}

/// Map an admission failure to its API response: field-scoped 422 for
/// rejections, 500 for dependency failures.
fn admission_response(err: AdmissionError) -> Response {
    match &err {
        AdmissionError::QuotaExceeded { .. } | AdmissionError::ProjectNotFound { .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "field": err.field(),
                "message": err.to_string(),
            })),
        )
            .into_response(),
        AdmissionError::Dependency(e) => {
            warn!("Quota admission dependency failure: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn create_namespace(
    State(state): State<AppState>,
    Json(mut ns): Json<Namespace>,
) -> impl IntoResponse {
    if let Err(e) = validate_name(&ns.name) {
        return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
    }

    let key = format!("{NAMESPACE_PREFIX}{}", ns.name);
    match state.store.get_json::<Namespace>(&key).await {
        Ok(Some(_)) => {
            return (StatusCode::CONFLICT, "Namespace already exists").into_response();
        }
        Ok(None) => {}
        Err(e) => {
            warn!("Failed to check for existing namespace: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    }

    // Quota fit check gates the write: the sum of member-namespace quotas
    // must stay within the project cap.
    let reads = RegistryReads::new(&state.store);
    if let Err(err) = validate_namespace_quota(
        &reads,
        Operation::Create,
        None,
        &ns.project_id,
        ns.resource_quota.as_ref().map(|q| &q.limit),
    )
    .await
    {
        info!("Rejected namespace {}: {}", ns.name, err);
        return admission_response(err);
    }

    ns.created_at = Utc::now();
    if let Err(e) = state.store.put_json(&key, &ns).await {
        warn!("Failed to create namespace: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to create namespace",
        )
            .into_response();
    }
    info!("Created namespace: {} (project {})", ns.name, ns.project_id);
    (StatusCode::CREATED, Json(ns)).into_response()
}

pub async fn update_namespace(
    State(state): State<AppState>,
    AxumPath(name): AxumPath<String>,
    Json(mut ns): Json<Namespace>,
) -> impl IntoResponse {
    let key = format!("{NAMESPACE_PREFIX}{name}");
    let existing: Namespace = match state.store.get_json(&key).await {
        Ok(Some(ns)) => ns,
        Ok(None) => return StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            warn!("Failed to load namespace {}: {}", name, e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    // The namespace's own stored quota is excluded from the committed total
    // so an unchanged quota cannot double-count against itself.
    let reads = RegistryReads::new(&state.store);
    if let Err(err) = validate_namespace_quota(
        &reads,
        Operation::Update,
        Some(&name),
        &ns.project_id,
        ns.resource_quota.as_ref().map(|q| &q.limit),
    )
    .await
    {
        info!("Rejected namespace update {}: {}", name, err);
        return admission_response(err);
    }

    ns.name = name;
    ns.created_at = existing.created_at;
    if let Err(e) = state.store.put_json(&key, &ns).await {
        warn!("Failed to update namespace: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to update namespace",
        )
            .into_response();
    }
    info!("Updated namespace: {}", ns.name);
    (StatusCode::OK, Json(ns)).into_response()
}

pub async fn list_namespaces(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let namespaces: Vec<Namespace> =
        match state.store.list_prefix_json(NAMESPACE_PREFIX).await {
            Ok(namespaces) => namespaces,
            Err(e) => {
                warn!("Failed to list namespaces: {}", e);
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        };
    let namespaces: Vec<Namespace> = namespaces
        .into_iter()
        .filter(|ns| {
            query
                .project
                .as_ref()
                .is_none_or(|project| &ns.project_id == project)
        })
        .collect();
    (StatusCode::OK, Json(namespaces)).into_response()
}

pub async fn get_namespace(
    State(state): State<AppState>,
    AxumPath(name): AxumPath<String>,
) -> impl IntoResponse {
    let key = format!("{NAMESPACE_PREFIX}{name}");
    match state.store.get_json::<Namespace>(&key).await {
        Ok(Some(ns)) => (StatusCode::OK, Json(ns)).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            warn!("Failed to load namespace {}: {}", name, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn delete_namespace(
    State(state): State<AppState>,
    AxumPath(name): AxumPath<String>,
) -> impl IntoResponse {
    let key = format!("{NAMESPACE_PREFIX}{name}");
    match state.store.delete(&key).await {
        Ok(_) => {
            info!("Deleted namespace {}", name);
            StatusCode::NO_CONTENT.into_response()
        }
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}
