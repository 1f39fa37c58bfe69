//! Policy model.
//!
//! A [`Policy`] is a named, immutable bundle of role → allowed-actions rules.
//! It is validated once at construction so evaluation never has to
//! second-guess its shape.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use warden_core::error::PolicyError;
use warden_core::id::{Action, Role};

/// A named bundle of permission rules.
///
/// Once built a policy cannot be changed. To alter permissions, build a new
/// policy with the same name and load it into the store in place of the old
/// one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    /// The unique name of this policy.
    name: String,

    /// The actions each role is allowed to perform.
    rules: BTreeMap<Role, BTreeSet<Action>>,
}

impl Policy {
    /// Create a new policy.
    ///
    /// # Arguments
    ///
    /// * `name` - The unique name of this policy.
    /// * `rules` - Pairs of a role and the actions it is allowed. A role
    ///   listed more than once gets the union of its action sets.
    ///
    /// # Returns
    ///
    /// * `Ok(Policy)` - The validated policy.
    /// * `Err(PolicyError::Malformed)` - If the name is blank, a role is
    ///   blank, a role has no actions, or an action is blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use warden_policy::Policy;
    ///
    /// let policy = Policy::new("admin_policy", [("admin", ["edit", "delete"])]).unwrap();
    /// assert!(policy.allows("admin", "edit"));
    /// assert!(!policy.allows("admin", "view"));
    /// ```
    pub fn new<N, I, R, A, S>(name: N, rules: I) -> Result<Self, PolicyError>
    where
        N: Into<String>,
        I: IntoIterator<Item = (R, A)>,
        R: Into<Role>,
        A: IntoIterator<Item = S>,
        S: Into<Action>,
    {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PolicyError::malformed("<unnamed>", "policy name is empty"));
        }

        let mut validated: BTreeMap<Role, BTreeSet<Action>> = BTreeMap::new();

        for (role, actions) in rules {
            let role = role.into();
            if role.is_blank() {
                return Err(PolicyError::malformed(&name, "role name is empty"));
            }

            let actions: BTreeSet<Action> = actions.into_iter().map(Into::into).collect();
            if actions.is_empty() {
                return Err(PolicyError::malformed(
                    &name,
                    format!("role '{}' has an empty action set", role),
                ));
            }
            if actions.iter().any(Action::is_blank) {
                return Err(PolicyError::malformed(
                    &name,
                    format!("role '{}' lists an empty action name", role),
                ));
            }

            validated.entry(role).or_default().extend(actions);
        }

        Ok(Self {
            name,
            rules: validated,
        })
    }

    /// Create a policy that grants nothing.
    pub fn empty(name: impl Into<String>) -> Result<Self, PolicyError> {
        Self::new(name, Vec::<(Role, Vec<Action>)>::new())
    }

    /// The name of this policy.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this policy grants `action` to `role`.
    pub fn allows(&self, role: &str, action: &str) -> bool {
        self.rules
            .get(role)
            .map(|actions| actions.contains(action))
            .unwrap_or(false)
    }

    /// The roles this policy names, in ascending order.
    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.rules.keys()
    }

    /// The actions granted to `role`, if the policy names it.
    pub fn actions_for(&self, role: &str) -> Option<&BTreeSet<Action>> {
        self.rules.get(role)
    }

    /// The full rule map.
    pub fn rules(&self) -> &BTreeMap<Role, BTreeSet<Action>> {
        &self.rules
    }

    /// Number of roles this policy names.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Whether this policy grants nothing.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if self.rules.is_empty() {
            return write!(f, " (grants nothing)");
        }
        write!(f, ":")?;
        for (role, actions) in &self.rules {
            write!(f, " {} -> [", role)?;
            for (i, action) in actions.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", action)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}
