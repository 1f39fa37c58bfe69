//! Policy definition documents.
//!
//! Policies are written as JSON in this shape:
//!
//! ```json
//! {
//!   "name": "admin_policy",
//!   "rules": {
//!     "admin": { "allow": { "action": ["edit", "delete"] } }
//!   }
//! }
//! ```
//!
//! A file holds either one such object or an array of them. Only `allow`
//! blocks are understood. A `deny` block is rejected rather than ignored,
//! since dropping it would grant more than the author wrote.

use serde_json::{json, Map, Value};
use std::path::Path;

use warden_core::error::{Error, PolicyError, Result};
use warden_core::id::Action;

use super::Policy;

const UNNAMED: &str = "<unnamed>";

impl Policy {
    /// Parse a single policy definition from JSON text.
    pub fn from_json(text: &str) -> std::result::Result<Self, PolicyError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| PolicyError::Parse(e.to_string()))?;
        Self::from_value(&value)
    }

    /// Build a policy from an already-parsed definition document.
    ///
    /// Every shape problem is reported as [`PolicyError::Malformed`] with
    /// the path of the offending element.
    pub fn from_value(value: &Value) -> std::result::Result<Self, PolicyError> {
        let obj = value
            .as_object()
            .ok_or_else(|| PolicyError::malformed(UNNAMED, "policy definition is not an object"))?;

        let name = match obj.get("name") {
            Some(Value::String(name)) => name.as_str(),
            Some(_) => return Err(PolicyError::malformed(UNNAMED, "name is not a string")),
            None => return Err(PolicyError::malformed(UNNAMED, "name is missing")),
        };

        reject_unknown_keys(name, "policy", obj, &["name", "rules"])?;

        let rules = match obj.get("rules") {
            Some(Value::Object(rules)) => rules,
            Some(_) => return Err(PolicyError::malformed(name, "rules is not an object")),
            None => return Err(PolicyError::malformed(name, "rules is missing")),
        };

        let mut parsed = Vec::with_capacity(rules.len());
        for (role, entry) in rules {
            parsed.push((role.as_str(), parse_role_entry(name, role, entry)?));
        }

        Self::new(name, parsed)
    }

    /// Render this policy back into its definition document.
    pub fn to_value(&self) -> Value {
        let rules: Map<String, Value> = self
            .rules()
            .iter()
            .map(|(role, actions)| {
                let actions: Vec<&str> = actions.iter().map(Action::as_str).collect();
                (role.to_string(), json!({ "allow": { "action": actions } }))
            })
            .collect();

        json!({ "name": self.name(), "rules": rules })
    }
}

fn parse_role_entry(
    policy: &str,
    role: &str,
    entry: &Value,
) -> std::result::Result<Vec<String>, PolicyError> {
    let entry = entry.as_object().ok_or_else(|| {
        PolicyError::malformed(policy, format!("rules.{} is not an object", role))
    })?;

    if entry.contains_key("deny") {
        return Err(PolicyError::malformed(
            policy,
            format!("rules.{}.deny: deny rules are not supported", role),
        ));
    }
    reject_unknown_keys(policy, &format!("rules.{}", role), entry, &["allow"])?;

    let allow = match entry.get("allow") {
        Some(Value::Object(allow)) => allow,
        Some(_) => {
            return Err(PolicyError::malformed(
                policy,
                format!("rules.{}.allow is not an object", role),
            ))
        }
        None => {
            return Err(PolicyError::malformed(
                policy,
                format!("rules.{}.allow is missing", role),
            ))
        }
    };
    reject_unknown_keys(policy, &format!("rules.{}.allow", role), allow, &["action"])?;

    let actions = match allow.get("action") {
        Some(Value::Array(actions)) => actions,
        Some(_) => {
            return Err(PolicyError::malformed(
                policy,
                format!("rules.{}.allow.action is not an array", role),
            ))
        }
        None => {
            return Err(PolicyError::malformed(
                policy,
                format!("rules.{}.allow.action is missing", role),
            ))
        }
    };

    actions
        .iter()
        .enumerate()
        .map(|(i, action)| {
            action.as_str().map(str::to_string).ok_or_else(|| {
                PolicyError::malformed(
                    policy,
                    format!("rules.{}.allow.action[{}] is not a string", role, i),
                )
            })
        })
        .collect()
}

fn reject_unknown_keys(
    policy: &str,
    path: &str,
    obj: &Map<String, Value>,
    known: &[&str],
) -> std::result::Result<(), PolicyError> {
    match obj.keys().find(|key| !known.contains(&key.as_str())) {
        Some(key) => Err(PolicyError::malformed(
            policy,
            format!("{}: unrecognized key '{}'", path, key),
        )),
        None => Ok(()),
    }
}

/// Parse a policy file body holding one definition or an array of them.
pub fn parse_policies(text: &str) -> std::result::Result<Vec<Policy>, PolicyError> {
    let value: Value = serde_json::from_str(text).map_err(|e| PolicyError::Parse(e.to_string()))?;

    match &value {
        Value::Array(items) => items.iter().map(Policy::from_value).collect(),
        single => Ok(vec![Policy::from_value(single)?]),
    }
}

/// Read and parse a policy file.
pub fn load_policy_file(path: impl AsRef<Path>) -> Result<Vec<Policy>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let policies = parse_policies(&text).map_err(Error::from)?;
    tracing::debug!(
        path = %path.display(),
        count = policies.len(),
        "parsed policy file"
    );
    Ok(policies)
}
