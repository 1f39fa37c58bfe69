//! Error types for the Warden access decision engine.
//!
//! Errors are grouped by the layer that raises them. Policy construction
//! failures (`PolicyError`) happen before any store mutation, and request
//! validation failures (`AccessError`) are raised by the access controller
//! and rendered back to the caller as plain messages.
//!
//! An ordinary deny is never an error. It is a `Decision` with
//! `allowed == false`.

use crate::id::{Action, Role};
use thiserror::Error;

/// Root error type for Warden.
#[derive(Debug, Error)]
pub enum Error {
    /// Policy definition errors
    #[error("Policy error: {0}")]
    Policy(#[from] PolicyError),

    /// Request validation errors
    #[error("Access error: {0}")]
    Access(#[from] AccessError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while building or parsing a policy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// Rule data failed shape validation
    #[error("Malformed policy '{policy}': {reason}")]
    Malformed {
        /// Name of the offending policy, or `<unnamed>` if the name itself is missing
        policy: String,

        /// What was wrong with it
        reason: String,
    },

    /// Input was not parseable as a policy document at all
    #[error("Failed to parse policy document: {0}")]
    Parse(String),
}

impl PolicyError {
    /// Shorthand for a [`PolicyError::Malformed`].
    pub fn malformed(policy: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            policy: policy.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised when a request falls outside the recognized vocabulary.
///
/// The display strings are the user-facing messages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// The role is not one of the recognized roles
    #[error("Invalid user role.")]
    InvalidRole(Role),

    /// The action is not one of the recognized actions
    #[error("Invalid action.")]
    InvalidAction(Action),
}

/// Result type used throughout Warden.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let policy_err = PolicyError::malformed("admin_policy", "empty action set");
        let error: Error = policy_err.into();
        assert!(matches!(error, Error::Policy(PolicyError::Malformed { .. })));

        let access_err = AccessError::InvalidRole(Role::from("superuser"));
        let error: Error = access_err.into();
        assert!(matches!(error, Error::Access(AccessError::InvalidRole(_))));
    }

    #[test]
    fn test_error_display() {
        let error = PolicyError::malformed("guest_policy", "role name is empty");
        assert_eq!(
            error.to_string(),
            "Malformed policy 'guest_policy': role name is empty"
        );

        assert_eq!(
            AccessError::InvalidRole(Role::from("superuser")).to_string(),
            "Invalid user role."
        );
        assert_eq!(
            AccessError::InvalidAction(Action::from("fly")).to_string(),
            "Invalid action."
        );
    }
}
