//! CLI subcommand implementations

pub mod check;
pub mod policy;

pub use check::{execute_check, execute_demo, execute_evaluate, EXIT_INVALID_REQUEST};
pub use policy::{execute_policies, execute_validate};
