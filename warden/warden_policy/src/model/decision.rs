//! Decision model.
//!
//! This module defines the result of evaluating one request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use warden_core::id::{Action, Role};

/// The outcome of evaluating a `(role, action)` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// The role that was evaluated.
    pub role: Role,

    /// The action that was evaluated.
    pub action: Action,

    /// Whether the action is allowed.
    pub allowed: bool,

    /// Human-readable explanation.
    pub reason: String,

    /// Names of the policies that granted the action, in ascending order.
    /// Empty on deny.
    pub granted_by: Vec<String>,

    /// When the evaluation was performed.
    pub evaluated_at: DateTime<Utc>,
}

impl Decision {
    /// An allow decision contributed to by `granted_by`.
    pub fn allow(role: Role, action: Action, granted_by: Vec<String>) -> Self {
        let reason = format!("granted by {}", granted_by.join(", "));
        Self {
            role,
            action,
            allowed: true,
            reason,
            granted_by,
            evaluated_at: Utc::now(),
        }
    }

    /// A default deny: no loaded policy grants the action.
    pub fn deny(role: Role, action: Action) -> Self {
        let reason = format!("no policy grants {} to {}", action, role);
        Self {
            role,
            action,
            allowed: false,
            reason,
            granted_by: Vec::new(),
            evaluated_at: Utc::now(),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.allowed { "Allow" } else { "Deny" };
        write!(
            f,
            "{} {} for {} ({})",
            verdict, self.action, self.role, self.reason
        )
    }
}
