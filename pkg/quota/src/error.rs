/// API field the quota check is scoped to when it rejects a write.
pub const QUOTA_FIELD: &str = "resourceQuota";

/// Terminal failures of a namespace-quota admission attempt. None of these
/// are retried here; a rejected write is never partially applied.
#[derive(Debug, thiserror::Error)]
pub enum AdmissionError {
    /// The candidate quota would push the project past its cap. Scoped to
    /// the `resourceQuota` field; the message names every exceeded resource.
    #[error("{message}")]
    QuotaExceeded { message: String },

    /// The namespace references a project that does not exist.
    #[error("project '{project_id}' not found")]
    ProjectNotFound { project_id: String },

    /// Project fetch or namespace list failed; the fit check was not run.
    #[error("dependency failure: {0}")]
    Dependency(#[source] anyhow::Error),
}

impl AdmissionError {
    /// The API field this error is scoped to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            AdmissionError::QuotaExceeded { .. } => Some(QUOTA_FIELD),
            AdmissionError::ProjectNotFound { .. } => Some("projectId"),
            AdmissionError::Dependency(_) => None,
        }
    }
}
