//! Access check commands
//!
//! `check`, `evaluate` and `demo` all run requests through the configured
//! access controller.

use std::io::Write;

use anyhow::Result;
use warden_policy::{AccessController, CheckOutcome, PolicyStore, DEMO_REQUESTS};

/// Exit status for a request that fails vocabulary validation under `--strict`
pub const EXIT_INVALID_REQUEST: u8 = 2;

/// Print the rendered decision message for one request
pub fn execute_check<S: PolicyStore>(
    controller: &AccessController<S>,
    role: &str,
    action: &str,
    out: &mut impl Write,
) -> Result<()> {
    writeln!(out, "{}", controller.check(role, action))?;
    Ok(())
}

/// Print the structured decision for one request as JSON
///
/// Without `strict` the request goes straight to the engine, so roles and
/// actions outside the vocabulary are simply denied. With `strict` they are
/// reported and the returned exit status is non-zero.
pub fn execute_evaluate<S: PolicyStore>(
    controller: &AccessController<S>,
    role: &str,
    action: &str,
    strict: bool,
    out: &mut impl Write,
) -> Result<u8> {
    let decision = if strict {
        match controller.outcome(role, action) {
            CheckOutcome::Allowed(decision) | CheckOutcome::Denied(decision) => decision,
            invalid => {
                writeln!(out, "{}", invalid.message())?;
                return Ok(EXIT_INVALID_REQUEST);
            }
        }
    } else {
        controller.engine().evaluate(role, action)
    };

    writeln!(out, "{}", serde_json::to_string_pretty(&decision)?)?;
    Ok(0)
}

/// Run the demo request pairs and print each message
pub fn execute_demo<S: PolicyStore>(
    controller: &AccessController<S>,
    out: &mut impl Write,
) -> Result<()> {
    for (role, action) in DEMO_REQUESTS {
        writeln!(out, "{} {}: {}", role, action, controller.check(role, action))?;
    }
    Ok(())
}
