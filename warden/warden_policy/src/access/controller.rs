//! Access controller.
//!
//! The controller is the entry point a front end calls. Each request goes
//! through validation and then evaluation, and ends in exactly one of four
//! outcomes, each with its own message:
//!
//! ```text
//! Received -> Validating -> InvalidRole   "Invalid user role."
//!                        -> InvalidAction "Invalid action."
//!                        -> Evaluating -> Allowed "Permission granted for {action} action."
//!                                      -> Denied  "Permission denied for {action} action."
//! ```

use std::fmt;
use tracing::debug;

use warden_core::error::{AccessError, PolicyError};
use warden_core::id::{Action, Role};

use super::Vocabulary;
use crate::engine::PolicyEngine;
use crate::model::Decision;
use crate::store::{InMemoryPolicyStore, PolicyStore};

/// The terminal state of one access check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The role is not recognized.
    InvalidRole(Role),

    /// The action is not recognized.
    InvalidAction(Action),

    /// A loaded policy grants the action.
    Allowed(Decision),

    /// No loaded policy grants the action.
    Denied(Decision),
}

impl CheckOutcome {
    /// The user-facing message for this outcome.
    pub fn message(&self) -> String {
        match self {
            Self::InvalidRole(role) => AccessError::InvalidRole(role.clone()).to_string(),
            Self::InvalidAction(action) => AccessError::InvalidAction(action.clone()).to_string(),
            Self::Allowed(decision) => {
                format!("Permission granted for {} action.", decision.action)
            }
            Self::Denied(decision) => {
                format!("Permission denied for {} action.", decision.action)
            }
        }
    }

    /// The decision, if the request got as far as evaluation.
    pub fn decision(&self) -> Option<&Decision> {
        match self {
            Self::Allowed(decision) | Self::Denied(decision) => Some(decision),
            Self::InvalidRole(_) | Self::InvalidAction(_) => None,
        }
    }

    /// Whether the request was allowed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed(_))
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl From<AccessError> for CheckOutcome {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::InvalidRole(role) => Self::InvalidRole(role),
            AccessError::InvalidAction(action) => Self::InvalidAction(action),
        }
    }
}

/// Validates requests against a vocabulary and evaluates them.
pub struct AccessController<S> {
    /// The engine requests are delegated to.
    engine: PolicyEngine<S>,

    /// The recognized roles and actions.
    vocabulary: Vocabulary,
}

impl<S> AccessController<S>
where
    S: PolicyStore,
{
    /// Create a new access controller.
    pub fn new(engine: PolicyEngine<S>, vocabulary: Vocabulary) -> Self {
        Self { engine, vocabulary }
    }

    /// The underlying engine.
    pub fn engine(&self) -> &PolicyEngine<S> {
        &self.engine
    }

    /// The recognized roles and actions.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Run a request to its terminal state.
    pub fn outcome(&self, user_role: &str, action: &str) -> CheckOutcome {
        match self.check_structured(user_role, action) {
            Ok(decision) if decision.allowed => CheckOutcome::Allowed(decision),
            Ok(decision) => CheckOutcome::Denied(decision),
            Err(err) => {
                debug!(role = %user_role, action = %action, error = %err, "rejected request");
                err.into()
            }
        }
    }

    /// Validate and evaluate a request, returning the structured decision.
    ///
    /// # Returns
    ///
    /// * `Ok(Decision)` - The decision, whether allow or deny.
    /// * `Err(AccessError)` - If the role or action is not recognized.
    pub fn check_structured(&self, user_role: &str, action: &str) -> Result<Decision, AccessError> {
        self.vocabulary.validate(user_role, action)?;
        Ok(self.engine.evaluate(user_role, action))
    }

    /// Validate and evaluate a request, returning the message to show.
    ///
    /// This never fails; invalid input is reported as a message.
    pub fn check(&self, user_role: &str, action: &str) -> String {
        self.outcome(user_role, action).message()
    }

    /// Front-end entry point: the message for one `(user_role, action)`
    /// request. No session or token is involved.
    pub fn check_access(&self, user_role: &str, action: &str) -> String {
        self.check(user_role, action)
    }
}

impl AccessController<InMemoryPolicyStore> {
    /// A controller wired with the demo policies and vocabulary.
    pub fn demo() -> Result<Self, PolicyError> {
        let store = InMemoryPolicyStore::with_policies(crate::demo_policies()?);
        Ok(Self::new(PolicyEngine::new(store), Vocabulary::demo()))
    }
}
