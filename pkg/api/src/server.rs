use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use chrono::Utc;
use std::net::SocketAddr;
use tracing::info;

use crate::AppState;
use crate::handlers::{namespaces, projects};
use crate::request_id::request_id_middleware;
use pkg_constants::state::{DEFAULT_PROJECT, NAMESPACE_PREFIX, PROJECT_PREFIX};
use pkg_state::client::StateStore;

/// Server configuration passed from the binary's CLI.
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub data_dir: String,
}

pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    let store = StateStore::new(&config.data_dir).await?;

    let state = AppState {
        store: store.clone(),
    };

    seed_defaults(&store).await?;

    let app = Router::new()
        .route(
            "/api/v1/projects",
            post(projects::create_project).get(projects::list_projects),
        )
        .route("/api/v1/projects/{name}", get(projects::get_project))
        .route(
            "/api/v1/namespaces",
            post(namespaces::create_namespace).get(namespaces::list_namespaces),
        )
        .route(
            "/api/v1/namespaces/{name}",
            put(namespaces::update_namespace)
                .get(namespaces::get_namespace)
                .delete(namespaces::delete_namespace),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state);

    info!("Starting API server on {}", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Seed the default project and namespace on startup. The default project
/// carries no quota cap, so its namespaces are unconstrained until an
/// operator sets one.
async fn seed_defaults(store: &StateStore) -> anyhow::Result<()> {
    let project_key = format!("{PROJECT_PREFIX}{DEFAULT_PROJECT}");
    if store
        .get_json::<pkg_types::project::Project>(&project_key)
        .await?
        .is_none()
    {
        let project = pkg_types::project::Project {
            name: DEFAULT_PROJECT.to_string(),
            resource_quota: None,
            namespace_default_resource_quota: None,
            labels: std::collections::HashMap::new(),
            created_at: Utc::now(),
        };
        store.put_json(&project_key, &project).await?;
        info!("Seeded project: {}", DEFAULT_PROJECT);
    }

    let ns_key = format!("{NAMESPACE_PREFIX}default");
    if store
        .get_json::<pkg_types::namespace::Namespace>(&ns_key)
        .await?
        .is_none()
    {
        let ns = pkg_types::namespace::Namespace {
            name: "default".to_string(),
            project_id: DEFAULT_PROJECT.to_string(),
            resource_quota: None,
            labels: std::collections::HashMap::new(),
            created_at: Utc::now(),
        };
        store.put_json(&ns_key, &ns).await?;
        info!("Seeded namespace: default");
    }

    Ok(())
}
