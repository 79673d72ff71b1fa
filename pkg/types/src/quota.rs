use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::quantity::Quantity;

/// A set of resource limits: resource name → quantity, e.g.
/// `{"limits.cpu": "2", "limits.memory": "1Gi"}`.
///
/// A key that is absent reads as zero, never as "unbounded". Aggregation
/// produces new sets; an existing set is never mutated by `sum`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LimitSet(BTreeMap<String, Quantity>);

impl LimitSet {
    pub fn new() -> LimitSet {
        LimitSet::default()
    }

    /// The quantity stored under `key`, or zero if the key is absent.
    pub fn get(&self, key: &str) -> Quantity {
        self.0.get(key).copied().unwrap_or(Quantity::ZERO)
    }

    /// Declared resource names, in deterministic (sorted) order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Quantity) {
        self.0.insert(key.into(), value);
    }

    /// Per-key arithmetic sum over the union of keys of all inputs.
    /// Associative and commutative; absent keys contribute zero.
    pub fn sum<'a, I>(sets: I) -> LimitSet
    where
        I: IntoIterator<Item = &'a LimitSet>,
    {
        let mut total = LimitSet::new();
        for set in sets {
            for (key, value) in &set.0 {
                let current = total.get(key);
                total.0.insert(key.clone(), current.saturating_add(*value));
            }
        }
        total
    }
}

impl FromIterator<(String, Quantity)> for LimitSet {
    fn from_iter<I: IntoIterator<Item = (String, Quantity)>>(iter: I) -> LimitSet {
        LimitSet(iter.into_iter().collect())
    }
}

/// A project's aggregate resource-quota cap across all of its namespaces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectResourceQuota {
    #[serde(default)]
    pub limit: LimitSet,
}

/// A namespace-level resource quota, either declared on the namespace or
/// inherited from the project's namespace default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceResourceQuota {
    #[serde(default)]
    pub limit: LimitSet,
}
