//! Policy evaluation engine.
//!
//! Evaluation is default-deny with a union of allows: a request is allowed
//! iff at least one loaded policy grants the action to the role. There are
//! no deny rules, so no policy can narrow what another grants.

use tracing::debug;

use warden_core::id::{Action, Role};

use crate::engine::DecisionAudit;
use crate::model::Decision;
use crate::store::PolicyStore;

/// Policy evaluation engine.
///
/// The engine knows nothing about which roles or actions "should" exist.
/// An unrecognized role simply matches no rule and is denied.
pub struct PolicyEngine<S> {
    /// The policy store.
    store: S,

    /// Where decisions are recorded, if auditing is enabled.
    audit: Option<DecisionAudit>,
}

impl<S> PolicyEngine<S>
where
    S: PolicyStore,
{
    /// Create a new policy engine over `store`.
    pub fn new(store: S) -> Self {
        Self { store, audit: None }
    }

    /// Record every decision into `audit`.
    pub fn with_audit(mut self, audit: DecisionAudit) -> Self {
        self.audit = Some(audit);
        self
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The attached audit log, if any.
    pub fn audit(&self) -> Option<&DecisionAudit> {
        self.audit.as_ref()
    }

    /// Evaluate whether `role` may perform `action`.
    ///
    /// The whole evaluation runs against one snapshot of the store, so a
    /// concurrent load or unload is either entirely visible or not at all.
    ///
    /// # Returns
    ///
    /// An allow decision naming every granting policy, or a deny decision
    /// if none grants it.
    pub fn evaluate(&self, role: impl Into<Role>, action: impl Into<Action>) -> Decision {
        let role = role.into();
        let action = action.into();
        let snapshot = self.store.snapshot();

        let granted_by: Vec<String> = snapshot
            .values()
            .filter(|policy| policy.allows(role.as_str(), action.as_str()))
            .map(|policy| policy.name().to_string())
            .collect();

        let decision = if granted_by.is_empty() {
            Decision::deny(role, action)
        } else {
            Decision::allow(role, action, granted_by)
        };

        debug!(
            role = %decision.role,
            action = %decision.action,
            allowed = decision.allowed,
            policies = snapshot.len(),
            "evaluated request"
        );

        if let Some(audit) = &self.audit {
            audit.record(decision.clone());
        }

        decision
    }

    /// Check if `role` may perform `action`.
    pub fn is_allowed(&self, role: impl Into<Role>, action: impl Into<Action>) -> bool {
        self.evaluate(role, action).allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Policy;
    use crate::store::InMemoryPolicyStore;

    fn engine() -> PolicyEngine<InMemoryPolicyStore> {
        let store = InMemoryPolicyStore::new();
        store.load(Policy::new("admin_policy", [("admin", ["edit", "delete"])]).unwrap());
        store.load(Policy::new("guest_policy", [("guest", ["view"])]).unwrap());
        PolicyEngine::new(store)
    }

    #[test]
    fn test_evaluate_allow() {
        let decision = engine().evaluate("admin", "edit");

        assert!(decision.allowed);
        assert_eq!(decision.granted_by, vec!["admin_policy"]);
        assert_eq!(decision.reason, "granted by admin_policy");
    }

    #[test]
    fn test_evaluate_default_deny() {
        let decision = engine().evaluate("guest", "delete");

        assert!(!decision.allowed);
        assert_eq!(decision.reason, "no policy grants delete to guest");
    }

    #[test]
    fn test_no_implicit_role_hierarchy() {
        assert!(!engine().is_allowed("admin", "view"));
    }

    #[test]
    fn test_unknown_role_is_denied_not_error() {
        let decision = engine().evaluate("superuser", "fly");
        assert!(!decision.allowed);
    }

    #[test]
    fn test_empty_store_denies() {
        let engine = PolicyEngine::new(InMemoryPolicyStore::new());
        assert!(!engine.is_allowed("admin", "edit"));
    }

    #[test]
    fn test_union_across_policies() {
        let engine = engine();
        engine
            .store()
            .load(Policy::new("ops_policy", [("admin", ["edit", "view"])]).unwrap());

        let decision = engine.evaluate("admin", "edit");
        assert_eq!(decision.granted_by, vec!["admin_policy", "ops_policy"]);
        assert_eq!(decision.reason, "granted by admin_policy, ops_policy");

        assert!(engine.is_allowed("admin", "view"));
    }

    #[test]
    fn test_sees_store_updates() {
        let engine = engine();
        assert!(engine.is_allowed("guest", "view"));

        engine.store().unload("guest_policy");
        assert!(!engine.is_allowed("guest", "view"));
    }

    #[test]
    fn test_records_into_audit() {
        let audit = DecisionAudit::new(10);
        let engine = engine().with_audit(audit.clone());

        engine.evaluate("admin", "edit");
        engine.evaluate("guest", "delete");

        assert_eq!(audit.get_all_decisions().len(), 2);
        assert_eq!(audit.get_decisions("guest").len(), 1);
    }

    #[test]
    fn test_audit_stays_bounded_under_arbitrary_roles() {
        let audit = DecisionAudit::new(2).with_max_roles(16);
        let engine = engine().with_audit(audit.clone());

        for i in 0..5_000 {
            assert!(!engine.is_allowed(format!("r{}", i), "view"));
        }

        assert_eq!(audit.role_count(), 16);
        assert!(audit.get_all_decisions().len() <= 32);
        assert_eq!(audit.get_decisions("r4999").len(), 1);
    }
}
