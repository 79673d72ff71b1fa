use async_trait::async_trait;

use pkg_constants::state::{NAMESPACE_PREFIX, PROJECT_PREFIX};
use pkg_quota::QuotaReads;
use pkg_state::client::StateStore;
use pkg_types::namespace::Namespace;
use pkg_types::project::Project;

/// `QuotaReads` over the registry: projects by key, namespaces by prefix
/// scan filtered on the owning project. Both reads propagate store and
/// decode failures, so admission sees a dependency error instead of a
/// partial sibling list.
pub struct RegistryReads<'a> {
    store: &'a StateStore,
}

impl<'a> RegistryReads<'a> {
    pub fn new(store: &'a StateStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl QuotaReads for RegistryReads<'_> {
    async fn get_project(&self, project_id: &str) -> anyhow::Result<Option<Project>> {
        let key = format!("{PROJECT_PREFIX}{project_id}");
        self.store.get_json(&key).await
    }

    async fn list_namespaces(&self, project_id: &str) -> anyhow::Result<Vec<Namespace>> {
        let namespaces: Vec<Namespace> = self.store.list_prefix_json(NAMESPACE_PREFIX).await?;
        Ok(namespaces
            .into_iter()
            .filter(|ns| ns.project_id == project_id)
            .collect())
    }
}
