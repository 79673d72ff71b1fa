use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::quota::{NamespaceResourceQuota, ProjectResourceQuota};

/// A tenant-level grouping of namespaces sharing an aggregate quota cap.
///
/// `resource_quota.limit` is the ceiling for the sum of all member-namespace
/// quotas; `namespace_default_resource_quota.limit` is applied to a member
/// namespace that declares no quota of its own. Both are optional — a
/// project with no `resource_quota` places no limit on its namespaces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub resource_quota: Option<ProjectResourceQuota>,
    #[serde(default)]
    pub namespace_default_resource_quota: Option<NamespaceResourceQuota>,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    pub created_at: DateTime<Utc>,
}
