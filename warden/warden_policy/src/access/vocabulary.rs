//! Recognized roles and actions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use warden_core::error::AccessError;
use warden_core::id::{Action, Role};

/// The roles and actions an application recognizes.
///
/// The engine itself is enumeration-free. The vocabulary is how an embedding
/// application rejects requests that fall outside what it knows about,
/// before they ever reach evaluation.
///
/// A field left out when deserializing takes its demo value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Recognized roles.
    #[serde(default = "default_roles")]
    pub roles: BTreeSet<Role>,

    /// Recognized actions.
    #[serde(default = "default_actions")]
    pub actions: BTreeSet<Action>,
}

const DEMO_ROLES: [&str; 2] = ["admin", "guest"];
const DEMO_ACTIONS: [&str; 3] = ["view", "edit", "delete"];

fn default_roles() -> BTreeSet<Role> {
    DEMO_ROLES.into_iter().map(Role::from).collect()
}

fn default_actions() -> BTreeSet<Action> {
    DEMO_ACTIONS.into_iter().map(Action::from).collect()
}

impl Vocabulary {
    /// Create a vocabulary from role and action names.
    pub fn new<R, A>(roles: R, actions: A) -> Self
    where
        R: IntoIterator,
        R::Item: Into<Role>,
        A: IntoIterator,
        A::Item: Into<Action>,
    {
        Self {
            roles: roles.into_iter().map(Into::into).collect(),
            actions: actions.into_iter().map(Into::into).collect(),
        }
    }

    /// The demo vocabulary: roles `admin` and `guest`, actions `view`,
    /// `edit` and `delete`.
    pub fn demo() -> Self {
        Self::new(DEMO_ROLES, DEMO_ACTIONS)
    }

    /// Whether `role` is recognized.
    pub fn recognizes_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    /// Whether `action` is recognized.
    pub fn recognizes_action(&self, action: &str) -> bool {
        self.actions.contains(action)
    }

    /// Check a request against the vocabulary. The role is checked first.
    pub fn validate(&self, role: &str, action: &str) -> Result<(), AccessError> {
        if !self.recognizes_role(role) {
            return Err(AccessError::InvalidRole(Role::from(role)));
        }
        if !self.recognizes_action(action) {
            return Err(AccessError::InvalidAction(Action::from(action)));
        }
        Ok(())
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::demo()
    }
}
