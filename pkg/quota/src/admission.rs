use async_trait::async_trait;
use tracing::debug;

use pkg_types::namespace::Namespace;
use pkg_types::project::Project;
use pkg_types::quota::LimitSet;

use crate::error::AdmissionError;
use crate::fit::is_quota_fit;

/// The kind of namespace write being admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
}

/// Read-only lookups the admission check depends on. Backed by the state
/// store in the server; by an in-memory map in tests. Reads are fresh per
/// call — the check holds no state and caches nothing.
#[async_trait]
pub trait QuotaReads {
    async fn get_project(&self, project_id: &str) -> anyhow::Result<Option<Project>>;
    async fn list_namespaces(&self, project_id: &str) -> anyhow::Result<Vec<Namespace>>;
}

/// Admission gate for a namespace create/update: would the candidate quota
/// keep the owning project within its cap?
///
/// `requested` is the quota on the in-flight request; when absent the
/// project's namespace default applies, and with no default there is nothing
/// to check. On `Update`, `namespace_id` names the namespace being written so
/// its previously stored quota is not double-counted against itself.
/// Sibling namespaces without a declared quota contribute zero — the project
/// default applies only to the namespace actually being validated.
///
/// Concurrent admissions against the same project are not serialized here;
/// two requests that each fit individually may jointly overshoot. Callers
/// needing stronger guarantees must serialize per project themselves.
pub async fn validate_namespace_quota<S>(
    store: &S,
    op: Operation,
    namespace_id: Option<&str>,
    project_id: &str,
    requested: Option<&LimitSet>,
) -> Result<(), AdmissionError>
where
    S: QuotaReads + ?Sized,
{
    let project = store
        .get_project(project_id)
        .await
        .map_err(AdmissionError::Dependency)?
        .ok_or_else(|| AdmissionError::ProjectNotFound {
            project_id: project_id.to_string(),
        })?;

    // No project cap: nothing to check.
    let Some(cap) = project.resource_quota.as_ref().map(|q| &q.limit) else {
        return Ok(());
    };

    let candidate = match requested {
        Some(limit) => limit,
        None => match project.namespace_default_resource_quota.as_ref() {
            Some(default) => &default.limit,
            None => return Ok(()),
        },
    };

    let namespaces = store
        .list_namespaces(project_id)
        .await
        .map_err(AdmissionError::Dependency)?;

    let siblings: Vec<LimitSet> = namespaces
        .iter()
        .filter(|ns| !(op == Operation::Update && namespace_id == Some(ns.name.as_str())))
        .filter_map(|ns| ns.resource_quota.as_ref().map(|q| q.limit.clone()))
        .collect();

    debug!(
        project = project_id,
        siblings = siblings.len(),
        "running quota fit check"
    );

    match is_quota_fit(candidate, &siblings, cap) {
        (true, _) => Ok(()),
        (false, detail) => Err(AdmissionError::QuotaExceeded {
            message: format!(
                "resource quota exceeds the project limit: {}",
                detail.unwrap_or_default()
            ),
        }),
    }
}
