// crates/qualreg-scenarios/src/suites/system_types.rs
// ============================================================================
// Module: System Types Scenario Group
// Description: Lifecycle checks for /v1/system-types.
// Purpose: Create, list, read, delete (204), error paths.
// Dependencies: rand, serde_json, suites
// ============================================================================

//! ## Overview
//! System types are a minimal resource: create, list, read, and delete
//! (204), plus the malformed-id and unassigned-id error paths.

use rand::rngs::StdRng;
use serde_json::json;

use crate::checks::CheckRecorder;
use crate::client::ApiClient;
use crate::data;
use crate::expect::captured_id;
use crate::expect::expect_no_content;
use crate::expect::expect_response_schema;
use crate::expect::expect_transport;
use crate::fixtures::require_fixture;
use crate::suites::Contracts;
use crate::suites::MALFORMED_ID;
use crate::suites::UNASSIGNED_ID;

/// Runs the system-types group.
pub async fn run(
    client: &ApiClient,
    contracts: &Contracts,
    checks: &mut CheckRecorder,
    rng: &mut StdRng,
) {
    let system_type_id = create_system_type(client, contracts, checks, rng).await;

    let name = "GET /v1/system-types";
    if let Some(response) = expect_transport(checks, name, client.get("/v1/system-types").await) {
        expect_response_schema(checks, name, &response, 200, &contracts.system_type_page);
    }

    let name = "GET /v1/system-types/:id";
    if let Some(id) = require_fixture(checks, name, system_type_id.as_deref()) {
        let result = client.get(&format!("/v1/system-types/{id}")).await;
        if let Some(response) = expect_transport(checks, name, result) {
            expect_response_schema(checks, name, &response, 200, &contracts.system_type);
        }
    }

    let name = "DEL /v1/system-types/:id";
    if let Some(id) = require_fixture(checks, name, system_type_id.as_deref()) {
        let result = client.delete(&format!("/v1/system-types/{id}")).await;
        if let Some(response) = expect_transport(checks, name, result) {
            expect_no_content(checks, name, &response);
        }
    }

    let name = "GET 422 /v1/system-types/:id";
    let result = client.get(&format!("/v1/system-types/{MALFORMED_ID}")).await;
    if let Some(response) = expect_transport(checks, name, result) {
        expect_response_schema(checks, name, &response, 422, &contracts.validation_error);
    }

    let name = "GET 404 /v1/system-types/:id";
    let result = client.get(&format!("/v1/system-types/{UNASSIGNED_ID}")).await;
    if let Some(response) = expect_transport(checks, name, result) {
        expect_response_schema(checks, name, &response, 404, &contracts.not_found);
    }
}

/// Creates a system type and captures its id.
async fn create_system_type(
    client: &ApiClient,
    contracts: &Contracts,
    checks: &mut CheckRecorder,
    rng: &mut StdRng,
) -> Option<String> {
    let name = "POST /v1/system-types";
    let body = json!({
        "name": data::alpha_name(rng, 150),
        "description": data::sentence(rng),
    });
    let response = expect_transport(checks, name, client.post("/v1/system-types", &body).await)?;
    expect_response_schema(checks, name, &response, 201, &contracts.system_type);
    captured_id(&response)
}
