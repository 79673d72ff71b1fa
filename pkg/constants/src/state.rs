//! State store key layout.

/// etcd-style key prefix for project objects.
pub const PROJECT_PREFIX: &str = "/registry/projects/";

/// etcd-style key prefix for namespace objects.
pub const NAMESPACE_PREFIX: &str = "/registry/namespaces/";

/// Name of the project every namespace lands in unless it says otherwise.
pub const DEFAULT_PROJECT: &str = "default";
