//! Policy models.
//!
//! This module defines the policy, its definition document format, and the
//! decision produced by evaluating a request.

pub mod decision;
pub mod document;
pub mod policy;

pub use decision::Decision;
pub use document::{load_policy_file, parse_policies};
pub use policy::Policy;
