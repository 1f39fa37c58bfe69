//! In-memory policy store.
//!
//! The store keeps one immutable map behind a lock. Every write builds a
//! new map and swaps it in, so a reader that has cloned the current `Arc`
//! keeps evaluating against that version no matter what is loaded after.

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

use super::{PolicySnapshot, PolicyStore};
use crate::model::Policy;

/// An in-memory policy store.
///
/// Clones share the same underlying state.
#[derive(Clone, Default)]
pub struct InMemoryPolicyStore {
    /// The current snapshot, indexed by policy name.
    current: Arc<RwLock<PolicySnapshot>>,
}

impl InMemoryPolicyStore {
    /// Create a new, empty in-memory policy store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store preloaded with `policies`.
    pub fn with_policies<I>(policies: I) -> Self
    where
        I: IntoIterator<Item = Policy>,
    {
        let store = Self::new();
        store.load_all(policies);
        store
    }

    /// Apply `update` to a copy of the current map and publish the result.
    ///
    /// The write lock is held for the copy and the swap, so concurrent
    /// writers are serialized and none of their updates is lost.
    fn update<F, T>(&self, update: F) -> T
    where
        F: FnOnce(&mut BTreeMap<String, Arc<Policy>>) -> T,
    {
        let mut current = self.current.write();
        let mut next: BTreeMap<String, Arc<Policy>> = (**current).clone();
        let result = update(&mut next);
        *current = Arc::new(next);
        result
    }
}

impl PolicyStore for InMemoryPolicyStore {
    fn load(&self, policy: Policy) -> Option<Arc<Policy>> {
        let name = policy.name().to_string();
        let replaced = self.update(|map| map.insert(name.clone(), Arc::new(policy)));

        if replaced.is_some() {
            info!(policy = %name, "replaced policy");
        } else {
            info!(policy = %name, "loaded policy");
        }

        replaced
    }

    fn load_all<I>(&self, policies: I)
    where
        I: IntoIterator<Item = Policy>,
    {
        let count = self.update(|map| {
            let mut count = 0usize;
            for policy in policies {
                map.insert(policy.name().to_string(), Arc::new(policy));
                count += 1;
            }
            count
        });

        info!(count, "loaded policy batch");
    }

    fn unload(&self, name: &str) -> Option<Arc<Policy>> {
        // Skip the copy entirely when there is nothing to remove
        if !self.current.read().contains_key(name) {
            debug!(policy = %name, "unload of absent policy ignored");
            return None;
        }

        let removed = self.update(|map| map.remove(name));
        if removed.is_some() {
            info!(policy = %name, "unloaded policy");
        }
        removed
    }

    fn clear(&self) {
        *self.current.write() = Arc::new(BTreeMap::new());
        info!("cleared all policies");
    }

    fn snapshot(&self) -> PolicySnapshot {
        self.current.read().clone()
    }
}
