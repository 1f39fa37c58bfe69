//! Decision auditing.
//!
//! This module keeps a bounded history of recent decisions per role.

use dashmap::DashMap;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

use warden_core::id::Role;

use crate::model::Decision;

/// Default number of decisions kept per role.
const DEFAULT_MAX_ENTRIES_PER_ROLE: usize = 1000;

/// Default number of roles tracked at once.
const DEFAULT_MAX_ROLES: usize = 1000;

/// Recent decisions for one role.
#[derive(Default)]
struct RoleLog {
    /// Sequence number of the latest record into this log.
    last_recorded: u64,

    /// The decisions, oldest first.
    decisions: VecDeque<Decision>,
}

/// A decision audit log.
///
/// Each role keeps at most `max_entries_per_role` decisions; older ones are
/// dropped first. At most `max_roles` roles are tracked: recording a new
/// role beyond that evicts the role recorded least recently. Under
/// concurrent recording the role bound may be exceeded briefly.
///
/// Clones share the same log.
#[derive(Clone)]
pub struct DecisionAudit {
    /// The audit entries, indexed by role.
    entries: Arc<DashMap<Role, RoleLog>>,

    /// Source of record sequence numbers.
    sequence: Arc<AtomicU64>,

    /// The maximum number of entries to keep per role.
    max_entries_per_role: usize,

    /// The maximum number of roles to track.
    max_roles: usize,
}

impl DecisionAudit {
    /// Create a new decision audit.
    ///
    /// # Arguments
    ///
    /// * `max_entries_per_role` - The maximum number of entries to keep per role.
    pub fn new(max_entries_per_role: usize) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            sequence: Arc::new(AtomicU64::new(0)),
            max_entries_per_role,
            max_roles: DEFAULT_MAX_ROLES,
        }
    }

    /// Limit the number of roles tracked at once. Zero is treated as one.
    pub fn with_max_roles(mut self, max_roles: usize) -> Self {
        self.max_roles = max_roles.max(1);
        self
    }

    /// Record a decision.
    pub fn record(&self, decision: Decision) {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);

        if !self.entries.contains_key(&decision.role) {
            self.evict_for_new_role();
        }

        let mut log = self.entries.entry(decision.role.clone()).or_default();
        log.last_recorded = seq;
        log.decisions.push_back(decision);

        while log.decisions.len() > self.max_entries_per_role {
            log.decisions.pop_front();
        }
    }

    fn evict_for_new_role(&self) {
        while self.entries.len() >= self.max_roles {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|entry| entry.value().last_recorded)
                .map(|entry| entry.key().clone());

            match oldest {
                Some(role) => {
                    debug!(role = %role, "evicted role from decision audit");
                    self.entries.remove(&role);
                }
                None => break,
            }
        }
    }

    /// Number of roles currently tracked.
    pub fn role_count(&self) -> usize {
        self.entries.len()
    }

    /// Get decisions for a role, oldest first.
    pub fn get_decisions(&self, role: &str) -> Vec<Decision> {
        self.entries
            .get(role)
            .map(|log| log.decisions.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Clear decisions for a role.
    pub fn clear_decisions(&self, role: &str) {
        self.entries.remove(role);
    }

    /// Get all decisions across roles.
    pub fn get_all_decisions(&self) -> Vec<Decision> {
        self.filter(|_| true)
    }

    /// Get decisions with the given outcome.
    pub fn get_decisions_by_outcome(&self, allowed: bool) -> Vec<Decision> {
        self.filter(|decision| decision.allowed == allowed)
    }

    /// Get decisions that `policy` contributed a grant to.
    pub fn get_decisions_by_policy(&self, policy: &str) -> Vec<Decision> {
        self.filter(|decision| decision.granted_by.iter().any(|name| name == policy))
    }

    fn filter<F>(&self, predicate: F) -> Vec<Decision>
    where
        F: Fn(&Decision) -> bool,
    {
        let mut decisions = Vec::new();

        for entry in self.entries.iter() {
            for decision in &entry.value().decisions {
                if predicate(decision) {
                    decisions.push(decision.clone());
                }
            }
        }

        decisions
    }
}

impl Default for DecisionAudit {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES_PER_ROLE)
    }
}
