use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::quota::NamespaceResourceQuota;

fn default_project() -> String {
    "default".to_string()
}

/// A workload-isolation unit belonging to exactly one project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Namespace {
    pub name: String,
    /// Owning project; defaults to the `default` project.
    #[serde(default = "default_project")]
    pub project_id: String,
    /// Quota declared on this namespace, if any. Counted against the owning
    /// project's cap.
    #[serde(default)]
    pub resource_quota: Option<NamespaceResourceQuota>,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    pub created_at: DateTime<Utc>,
}
