// crates/qualreg-scenarios/src/suites/roles.rs
// ============================================================================
// Module: Roles Scenario Group
// Description: Lifecycle checks for /v1/roles.
// Purpose: Create, list, read, update, delete, error paths.
// Dependencies: rand, serde_json, suites
// ============================================================================

//! ## Overview
//! Roles are the one resource with an update step. The service answers a
//! PUT with 201, not 200; that status is part of the documented contract
//! (confirmed against the origin router), so the suite asserts it.

use rand::rngs::StdRng;
use serde_json::json;

use crate::checks::CheckRecorder;
use crate::client::ApiClient;
use crate::data;
use crate::expect::captured_id;
use crate::expect::expect_response_schema;
use crate::expect::expect_transport;
use crate::fixtures::require_fixture;
use crate::suites::Contracts;
use crate::suites::MALFORMED_ID;
use crate::suites::UNASSIGNED_ID;

/// Runs the roles group.
pub async fn run(
    client: &ApiClient,
    contracts: &Contracts,
    checks: &mut CheckRecorder,
    rng: &mut StdRng,
) {
    let role_id = create_role(client, contracts, checks, rng).await;

    let name = "GET /v1/roles";
    if let Some(response) = expect_transport(checks, name, client.get("/v1/roles").await) {
        expect_response_schema(checks, name, &response, 200, &contracts.role_page);
    }

    let name = "GET /v1/roles/:id";
    if let Some(id) = require_fixture(checks, name, role_id.as_deref()) {
        let result = client.get(&format!("/v1/roles/{id}")).await;
        if let Some(response) = expect_transport(checks, name, result) {
            expect_response_schema(checks, name, &response, 200, &contracts.role);
        }
    }

    let name = "PUT /v1/roles/:id";
    if let Some(id) = require_fixture(checks, name, role_id.as_deref()) {
        let body = json!({ "description": data::sentence(rng) });
        let result = client.put(&format!("/v1/roles/{id}"), &body).await;
        if let Some(response) = expect_transport(checks, name, result) {
            expect_response_schema(checks, name, &response, 201, &contracts.role);
        }
    }

    let name = "GET 422 /v1/roles/:id";
    let result = client.get(&format!("/v1/roles/{MALFORMED_ID}")).await;
    if let Some(response) = expect_transport(checks, name, result) {
        expect_response_schema(checks, name, &response, 422, &contracts.validation_error);
    }

    let name = "DEL /v1/roles/:id";
    if let Some(id) = require_fixture(checks, name, role_id.as_deref()) {
        let result = client.delete(&format!("/v1/roles/{id}")).await;
        if let Some(response) = expect_transport(checks, name, result) {
            expect_response_schema(checks, name, &response, 200, &contracts.role);
        }
    }

    let name = "GET 404 /v1/roles/:id";
    let result = client.get(&format!("/v1/roles/{UNASSIGNED_ID}")).await;
    if let Some(response) = expect_transport(checks, name, result) {
        expect_response_schema(checks, name, &response, 404, &contracts.not_found);
    }
}

/// Creates a role with a column-limit-length name and captures its id.
async fn create_role(
    client: &ApiClient,
    contracts: &Contracts,
    checks: &mut CheckRecorder,
    rng: &mut StdRng,
) -> Option<String> {
    let name = "POST /v1/roles";
    let body = json!({
        "name": data::alpha_name(rng, 150),
        "description": data::sentence(rng),
    });
    let response = expect_transport(checks, name, client.post("/v1/roles", &body).await)?;
    expect_response_schema(checks, name, &response, 201, &contracts.role);
    captured_id(&response)
}
