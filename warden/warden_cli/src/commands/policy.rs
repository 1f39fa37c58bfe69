//! Policy management commands
//!
//! Listing the loaded policies and validating policy files.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use warden_policy::{load_policy_file, AccessController, PolicyStore};

/// List the loaded policies with their rules
pub fn execute_policies<S: PolicyStore>(
    controller: &AccessController<S>,
    out: &mut impl Write,
) -> Result<()> {
    let policies = controller.engine().store().all();

    if policies.is_empty() {
        writeln!(out, "No policies loaded")?;
        return Ok(());
    }

    for policy in policies {
        writeln!(out, "{}", policy)?;
    }
    Ok(())
}

/// Parse a policy file and report what it defines
pub fn execute_validate(file: &Path, out: &mut impl Write) -> Result<()> {
    let policies = load_policy_file(file)
        .with_context(|| format!("Invalid policy file: {}", file.display()))?;

    writeln!(
        out,
        "{}: {} valid {}",
        file.display(),
        policies.len(),
        if policies.len() == 1 { "policy" } else { "policies" }
    )?;
    for policy in &policies {
        writeln!(out, "  {}", policy)?;
    }
    Ok(())
}
