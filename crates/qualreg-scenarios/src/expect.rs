// crates/qualreg-scenarios/src/expect.rs
// ============================================================================
// Module: Response Assertions
// Description: Contract-testing assertions recording into the check log.
// Purpose: Compare responses against expected status and schema with detail.
// Dependencies: qualreg-contract, serde_json
// ============================================================================

//! ## Overview
//! Assertion helpers turn a response into a single recorded check. On
//! divergence the failure details name the wrong status and every
//! violating property path, so a summary reader never sees a bare
//! pass/fail. Transport failures are also recorded checks: the suite keeps
//! going, the run fails at the threshold gate.

// ============================================================================
// SECTION: Imports
// ============================================================================

use qualreg_contract::ContractValidator;
use serde_json::Value;

use crate::checks::CheckRecorder;
use crate::client::ApiResponse;
use crate::client::ClientError;

// ============================================================================
// SECTION: Assertions
// ============================================================================

/// Unwraps a transport result, recording a failed check on error.
pub fn expect_transport(
    checks: &mut CheckRecorder,
    name: &str,
    result: Result<ApiResponse, ClientError>,
) -> Option<ApiResponse> {
    match result {
        Ok(response) => Some(response),
        Err(err) => {
            checks.fail(name, vec![format!("transport: {err}")]);
            None
        }
    }
}

/// Asserts the expected status and that the body satisfies the contract.
///
/// Records exactly one check under `name`. Extra body keys are permitted;
/// a missing or non-JSON body, a status mismatch, and every schema
/// violation each contribute a detail line.
pub fn expect_response_schema(
    checks: &mut CheckRecorder,
    name: &str,
    response: &ApiResponse,
    expected_status: u16,
    validator: &ContractValidator,
) {
    let mut details = Vec::new();
    if response.status != expected_status {
        details.push(format!("status: expected {expected_status}, got {}", response.status));
    }
    match &response.body {
        Some(body) => {
            for violation in validator.check(body) {
                details.push(violation.to_string());
            }
        }
        None => details.push("body: empty or not valid JSON".to_string()),
    }
    if details.is_empty() {
        checks.pass(name);
    } else {
        checks.fail(name, details);
    }
}

/// Asserts a 204 response with an empty body.
pub fn expect_no_content(checks: &mut CheckRecorder, name: &str, response: &ApiResponse) {
    let mut details = Vec::new();
    if response.status != 204 {
        details.push(format!("status: expected 204, got {}", response.status));
    }
    if response.body_len > 0 {
        details.push(format!("body: expected empty, got {} bytes", response.body_len));
    }
    if details.is_empty() {
        checks.pass(name);
    } else {
        checks.fail(name, details);
    }
}

/// Extracts the `id` string from a create response body.
#[must_use]
pub fn captured_id(response: &ApiResponse) -> Option<String> {
    response
        .body
        .as_ref()
        .and_then(Value::as_object)
        .and_then(|object| object.get("id"))
        .and_then(Value::as_str)
        .map(ToString::to_string)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
