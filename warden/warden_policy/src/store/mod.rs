//! Policy storage.
//!
//! This module provides storage for loaded policies.

mod in_memory;

pub use in_memory::InMemoryPolicyStore;

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::model::Policy;

/// A consistent, read-only view of every loaded policy, keyed by name.
pub type PolicySnapshot = Arc<BTreeMap<String, Arc<Policy>>>;

/// Trait for policy storage.
///
/// A policy store holds policies by unique name. Readers always see one
/// whole version of the store: a write is either fully visible to a
/// snapshot or not at all.
pub trait PolicyStore: Send + Sync {
    /// Insert a policy, replacing any policy with the same name.
    ///
    /// # Returns
    ///
    /// The policy that was replaced, if any.
    fn load(&self, policy: Policy) -> Option<Arc<Policy>>;

    /// Insert or replace a batch of policies as a single update.
    fn load_all<I>(&self, policies: I)
    where
        I: IntoIterator<Item = Policy>;

    /// Remove a policy by name. Removing an absent name is a no-op.
    ///
    /// # Returns
    ///
    /// The removed policy, if there was one.
    fn unload(&self, name: &str) -> Option<Arc<Policy>>;

    /// Remove every policy.
    fn clear(&self);

    /// Take a snapshot of the current store contents.
    fn snapshot(&self) -> PolicySnapshot;

    /// Get a policy by name.
    fn get(&self, name: &str) -> Option<Arc<Policy>> {
        self.snapshot().get(name).cloned()
    }

    /// All loaded policies, in name order.
    fn all(&self) -> Vec<Arc<Policy>> {
        self.snapshot().values().cloned().collect()
    }

    /// Number of loaded policies.
    fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// Whether the store holds no policies.
    fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }
}
