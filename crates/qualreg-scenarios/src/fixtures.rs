// crates/qualreg-scenarios/src/fixtures.rs
// ============================================================================
// Module: Fixture Threading
// Description: Explicit handling of ids captured by earlier steps.
// Purpose: Short-circuit dependent steps when a fixture is missing.
// Dependencies: checks
// ============================================================================

//! ## Overview
//! A dependent step claims its fixture before sending anything. A missing
//! fixture (the create step failed or was skipped) records an explicit
//! "no fixture" failure and skips only that step; it is a suite-local
//! signal, never a service error, and never sends a request with an
//! undefined id.

use crate::checks::CheckRecorder;

/// Claims a fixture for a dependent step.
///
/// Returns the fixture value when present. When absent, records a failed
/// check naming the step and returns `None` so the caller skips the step.
pub fn require_fixture<'a>(
    checks: &mut CheckRecorder,
    step: &str,
    fixture: Option<&'a str>,
) -> Option<&'a str> {
    match fixture {
        Some(value) => Some(value),
        None => {
            checks.fail(step, vec!["no fixture: prior create step did not yield an id".to_string()]);
            None
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
