// crates/qualreg-scenarios/src/suites/health.rs
// ============================================================================
// Module: Health Scenario Group
// Description: Readiness probe against the service root.
// Purpose: Verify the service answers before the resource groups run.
// Dependencies: suites
// ============================================================================

//! ## Overview
//! The first group to run: a readiness probe against the service root that
//! confirms the service answers before the resource groups execute.

use crate::checks::CheckRecorder;
use crate::client::ApiClient;
use crate::expect::expect_response_schema;
use crate::expect::expect_transport;
use crate::suites::Contracts;

/// Runs the health group.
pub async fn run(client: &ApiClient, contracts: &Contracts, checks: &mut CheckRecorder) {
    let name = "GET /health";
    if let Some(response) = expect_transport(checks, name, client.get("/health").await) {
        expect_response_schema(checks, name, &response, 200, &contracts.health);
    }
}
