//! Request validation and decision rendering.
//!
//! This module wraps the engine with the application's recognized roles
//! and actions.

mod controller;
mod vocabulary;

pub use controller::{AccessController, CheckOutcome};
pub use vocabulary::Vocabulary;
