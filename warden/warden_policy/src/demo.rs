//! The demo policy set.
//!
//! `admin` may edit and delete, `guest` may view. Nothing else is granted.

use warden_core::error::PolicyError;

use crate::model::Policy;

/// Request pairs exercised by the demo, with the roles and actions the
/// demo vocabulary recognizes.
pub const DEMO_REQUESTS: [(&str, &str); 3] =
    [("admin", "edit"), ("guest", "delete"), ("admin", "view")];

/// Build the demo policies: `admin_policy` and `guest_policy`.
pub fn demo_policies() -> Result<Vec<Policy>, PolicyError> {
    Ok(vec![
        Policy::new("admin_policy", [("admin", ["edit", "delete"])])?,
        Policy::new("guest_policy", [("guest", ["view"])])?,
    ])
}
