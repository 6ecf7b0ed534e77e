// crates/qualreg-scenarios/src/suites/vendors.rs
// ============================================================================
// Module: Vendors Scenario Group
// Description: Lifecycle checks for /v1/vendors.
// Purpose: Create, list, read (by id and KVK number), delete, error paths.
// Dependencies: rand, serde_json, suites
// ============================================================================

//! ## Overview
//! The create step captures both the vendor id and the KVK number so the
//! secondary-lookup step can run. Vendor deletion returns the deleted
//! resource (200), unlike the 204-style resources.

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

/// Ids captured by the create step.
struct CreatedVendor {
    /// Vendor id returned by the service.
    id: Option<String>,
    /// KVK number sent in the create payload.
    kvk_number: Option<String>,
}

/// Runs the vendors group.
pub async fn run(
    client: &ApiClient,
    contracts: &Contracts,
    checks: &mut CheckRecorder,
    rng: &mut StdRng,
) {
    let created = create_vendor(client, contracts, checks, rng).await;

    let name = "GET /v1/vendors";
    if let Some(response) = expect_transport(checks, name, client.get("/v1/vendors").await) {
        expect_response_schema(checks, name, &response, 200, &contracts.vendor_page);
    }

    let name = "GET /v1/vendors/:id";
    if let Some(id) = require_fixture(checks, name, created.id.as_deref()) {
        let result = client.get(&format!("/v1/vendors/{id}")).await;
        if let Some(response) = expect_transport(checks, name, result) {
            expect_response_schema(checks, name, &response, 200, &contracts.vendor);
        }
    }

    let name = "GET /v1/vendors/kvk_number/:kvk_number";
    if let Some(kvk) = require_fixture(checks, name, created.kvk_number.as_deref()) {
        let result = client.get(&format!("/v1/vendors/kvk_number/{kvk}")).await;
        if let Some(response) = expect_transport(checks, name, result) {
            expect_response_schema(checks, name, &response, 200, &contracts.vendor);
        }
    }

    let name = "DEL /v1/vendors/:id";
    if let Some(id) = require_fixture(checks, name, created.id.as_deref()) {
        let result = client.delete(&format!("/v1/vendors/{id}")).await;
        if let Some(response) = expect_transport(checks, name, result) {
            expect_response_schema(checks, name, &response, 200, &contracts.vendor);
        }
    }

    let name = "GET 422 /v1/vendors/:id";
    let result = client.get(&format!("/v1/vendors/{MALFORMED_ID}")).await;
    if let Some(response) = expect_transport(checks, name, result) {
        expect_response_schema(checks, name, &response, 422, &contracts.validation_error);
    }

    let name = "GET 404 /v1/vendors/:id";
    let result = client.get(&format!("/v1/vendors/{UNASSIGNED_ID}")).await;
    if let Some(response) = expect_transport(checks, name, result) {
        expect_response_schema(checks, name, &response, 404, &contracts.not_found);
    }
}

/// Creates a vendor and captures its id and KVK number.
async fn create_vendor(
    client: &ApiClient,
    contracts: &Contracts,
    checks: &mut CheckRecorder,
    rng: &mut StdRng,
) -> CreatedVendor {
    let name = "POST /v1/vendors";
    let kvk_number = data::kvk_number(rng);
    let body = json!({
        "kvkNumber": kvk_number,
        "tradeName": data::company_name(rng),
        "statutoryName": data::company_name(rng),
    });
    let Some(response) = expect_transport(checks, name, client.post("/v1/vendors", &body).await)
    else {
        return CreatedVendor {
            id: None,
            kvk_number: None,
        };
    };
    expect_response_schema(checks, name, &response, 201, &contracts.vendor);
    CreatedVendor {
        id: captured_id(&response),
        kvk_number: Some(kvk_number),
    }
}
