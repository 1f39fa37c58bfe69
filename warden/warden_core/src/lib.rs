//! # Warden Core
//!
//! `warden_core` provides the shared building blocks for the Warden access
//! decision engine: the error hierarchy, the role and action identifier
//! types, and logging setup.
//!
//! ## Crate Structure
//!
//! - **error**: Error types for all Warden components
//! - **id**: Role and action identifiers
//! - **utils**: Logging level and subscriber setup

pub mod error;
pub mod id;
pub mod utils;

// Re-export key types for convenience
pub use error::{AccessError, Error, PolicyError, Result};
pub use id::{Action, Role};
pub use utils::{init_logging, LogLevel};
