//! Policy evaluation engine.
//!
//! This module provides the evaluator and the decision audit log.

mod audit;
mod evaluator;

pub use audit::DecisionAudit;
pub use evaluator::PolicyEngine;
