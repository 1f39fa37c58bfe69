//! # Warden Policy
//!
//! `warden_policy` is a role-based access decision engine. Given a set of
//! policies mapping roles to allowed actions, it answers whether a role may
//! perform an action.
//!
//! Key concepts:
//!
//! 1. **Policy**: An immutable, named bundle of role → allowed-actions rules,
//!    validated when it is built.
//!
//! 2. **Policy Store**: The live set of policies, keyed by name. Writers swap
//!    in whole new versions; readers evaluate against one consistent snapshot.
//!
//! 3. **Policy Engine**: Default-deny evaluation. A request is allowed iff at
//!    least one loaded policy grants it.
//!
//! 4. **Access Controller**: Checks a request against the application's
//!    recognized roles and actions, evaluates it, and renders the message
//!    shown to the user.
//!
//! # Examples
//!
//! ```
//! use warden_policy::AccessController;
//!
//! let controller = AccessController::demo().unwrap();
//! assert_eq!(controller.check("admin", "edit"), "Permission granted for edit action.");
//! assert_eq!(controller.check("admin", "fly"), "Invalid action.");
//! ```

pub mod access;
pub mod demo;
pub mod engine;
pub mod model;
pub mod store;

// Re-export key types and traits for convenience
pub use access::{AccessController, CheckOutcome, Vocabulary};
pub use demo::{demo_policies, DEMO_REQUESTS};
pub use engine::{DecisionAudit, PolicyEngine};
pub use model::{load_policy_file, parse_policies, Decision, Policy};
pub use store::{InMemoryPolicyStore, PolicySnapshot, PolicyStore};
