// crates/qualreg-scenarios/src/suites/applications.rs
// ============================================================================
// Module: Applications Scenario Group
// Description: Lifecycle checks for /v1/applications.
// Purpose: Register an application under a vendor and verify nesting.
// Dependencies: rand, serde_json, suites
// ============================================================================

//! ## Overview
//! Applications are registered under a vendor and reference roles and
//! system types by name, so this group fabricates all three prerequisites
//! first. The application response embeds the owning vendor plus its
//! versions, roles, and system types; the page and read steps assert that
//! nesting. The application and vendor are deleted afterwards (application
//! first, the service refuses to delete a vendor that still has one).

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

/// Prerequisite resources the registration step needs.
struct Prerequisites {
    /// Owning vendor id.
    vendor_id: Option<String>,
    /// Role name referenced by the registration payload.
    role_name: String,
    /// System type name referenced by the registration payload.
    system_type_name: String,
}

/// Runs the applications group.
pub async fn run(
    client: &ApiClient,
    contracts: &Contracts,
    checks: &mut CheckRecorder,
    rng: &mut StdRng,
) {
    let prerequisites = create_prerequisites(client, contracts, checks, rng).await;
    let application_id =
        register_application(client, contracts, checks, rng, &prerequisites).await;

    let name = "GET /v1/applications";
    if let Some(response) = expect_transport(checks, name, client.get("/v1/applications").await) {
        expect_response_schema(checks, name, &response, 200, &contracts.application_page);
    }

    let name = "GET /v1/applications/:id";
    if let Some(id) = require_fixture(checks, name, application_id.as_deref()) {
        let result = client.get(&format!("/v1/applications/{id}")).await;
        if let Some(response) = expect_transport(checks, name, result) {
            expect_response_schema(checks, name, &response, 200, &contracts.application);
        }
    }

    let name = "DEL /v1/applications/:id";
    if let Some(id) = require_fixture(checks, name, application_id.as_deref()) {
        let result = client.delete(&format!("/v1/applications/{id}")).await;
        if let Some(response) = expect_transport(checks, name, result) {
            expect_response_schema(checks, name, &response, 200, &contracts.application);
        }
    }

    let name = "GET 422 /v1/applications/:id";
    let result = client.get(&format!("/v1/applications/{MALFORMED_ID}")).await;
    if let Some(response) = expect_transport(checks, name, result) {
        expect_response_schema(checks, name, &response, 422, &contracts.validation_error);
    }

    let name = "GET 404 /v1/applications/:id";
    let result = client.get(&format!("/v1/applications/{UNASSIGNED_ID}")).await;
    if let Some(response) = expect_transport(checks, name, result) {
        expect_response_schema(checks, name, &response, 404, &contracts.not_found);
    }

    let name = "DEL /v1/vendors/:id";
    if let Some(id) = require_fixture(checks, name, prerequisites.vendor_id.as_deref()) {
        let result = client.delete(&format!("/v1/vendors/{id}")).await;
        if let Some(response) = expect_transport(checks, name, result) {
            expect_response_schema(checks, name, &response, 200, &contracts.vendor);
        }
    }
}

/// Creates the vendor, role, and system type the registration references.
async fn create_prerequisites(
    client: &ApiClient,
    contracts: &Contracts,
    checks: &mut CheckRecorder,
    rng: &mut StdRng,
) -> Prerequisites {
    let name = "POST /v1/vendors";
    let vendor_body = json!({
        "kvkNumber": data::kvk_number(rng),
        "tradeName": data::company_name(rng),
        "statutoryName": data::company_name(rng),
    });
    let vendor_id = match expect_transport(
        checks,
        name,
        client.post("/v1/vendors", &vendor_body).await,
    ) {
        Some(response) => {
            expect_response_schema(checks, name, &response, 201, &contracts.vendor);
            captured_id(&response)
        }
        None => None,
    };

    let role_name = data::alpha_name(rng, 24);
    let name = "POST /v1/roles";
    let role_body = json!({ "name": role_name, "description": data::sentence(rng) });
    if let Some(response) =
        expect_transport(checks, name, client.post("/v1/roles", &role_body).await)
    {
        expect_response_schema(checks, name, &response, 201, &contracts.role);
    }

    let system_type_name = data::alpha_name(rng, 24);
    let name = "POST /v1/system-types";
    let system_type_body =
        json!({ "name": system_type_name, "description": data::sentence(rng) });
    if let Some(response) =
        expect_transport(checks, name, client.post("/v1/system-types", &system_type_body).await)
    {
        expect_response_schema(checks, name, &response, 201, &contracts.system_type);
    }

    Prerequisites {
        vendor_id,
        role_name,
        system_type_name,
    }
}

/// Registers an application under the vendor and captures its id.
async fn register_application(
    client: &ApiClient,
    contracts: &Contracts,
    checks: &mut CheckRecorder,
    rng: &mut StdRng,
    prerequisites: &Prerequisites,
) -> Option<String> {
    let name = "POST /v1/applications/vendors/:vendor_id";
    let vendor_id = require_fixture(checks, name, prerequisites.vendor_id.as_deref())?;
    let body = json!({
        "name": data::company_name(rng),
        "version": data::version_string(rng),
        "roles": [prerequisites.role_name],
        "systemTypes": [prerequisites.system_type_name],
    });
    let result = client.post(&format!("/v1/applications/vendors/{vendor_id}"), &body).await;
    let response = expect_transport(checks, name, result)?;
    expect_response_schema(checks, name, &response, 200, &contracts.application);
    captured_id(&response)
}
