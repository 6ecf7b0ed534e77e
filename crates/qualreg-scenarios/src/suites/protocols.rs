// crates/qualreg-scenarios/src/suites/protocols.rs
// ============================================================================
// Module: Protocols Scenario Group
// Description: Lifecycle checks for /v1/protocols and nested versions.
// Purpose: Exercise the parent/child ordering: version before protocol.
// Dependencies: rand, serde_json, suites
// ============================================================================

//! ## Overview
//! The only group with a nested sub-resource flow: a version is created
//! under the protocol, deleted on its own (204), and only then is the
//! parent protocol deleted (204). The version delete step needs both ids,
//! so it claims both fixtures before sending anything.

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

/// Protocol type accepted by the service for new protocols.
const PROTOCOL_TYPE: &str = "InformationStandard";

/// Runs the protocols group.
pub async fn run(
    client: &ApiClient,
    contracts: &Contracts,
    checks: &mut CheckRecorder,
    rng: &mut StdRng,
) {
    let protocol_id = create_protocol(client, contracts, checks, rng).await;

    let name = "GET /v1/protocols";
    if let Some(response) = expect_transport(checks, name, client.get("/v1/protocols").await) {
        expect_response_schema(checks, name, &response, 200, &contracts.protocol_page);
    }

    let name = "GET /v1/protocols/:id";
    if let Some(id) = require_fixture(checks, name, protocol_id.as_deref()) {
        let result = client.get(&format!("/v1/protocols/{id}")).await;
        if let Some(response) = expect_transport(checks, name, result) {
            expect_response_schema(checks, name, &response, 200, &contracts.protocol);
        }
    }

    let version_id = create_protocol_version(
        client,
        contracts,
        checks,
        rng,
        protocol_id.as_deref(),
    )
    .await;

    let name = "DEL /v1/protocols/:id/versions/:version_id";
    match (protocol_id.as_deref(), version_id.as_deref()) {
        (Some(id), Some(vid)) => {
            let result = client.delete(&format!("/v1/protocols/{id}/versions/{vid}")).await;
            if let Some(response) = expect_transport(checks, name, result) {
                expect_no_content(checks, name, &response);
            }
        }
        _ => checks.fail(
            name,
            vec!["no fixture: protocol or version id missing".to_string()],
        ),
    }

    let name = "DEL /v1/protocols/:id";
    if let Some(id) = require_fixture(checks, name, protocol_id.as_deref()) {
        let result = client.delete(&format!("/v1/protocols/{id}")).await;
        if let Some(response) = expect_transport(checks, name, result) {
            expect_no_content(checks, name, &response);
        }
    }

    let name = "GET 422 /v1/protocols/:id";
    let result = client.get(&format!("/v1/protocols/{MALFORMED_ID}")).await;
    if let Some(response) = expect_transport(checks, name, result) {
        expect_response_schema(checks, name, &response, 422, &contracts.validation_error);
    }

    let name = "GET 404 /v1/protocols/:id";
    let result = client.get(&format!("/v1/protocols/{UNASSIGNED_ID}")).await;
    if let Some(response) = expect_transport(checks, name, result) {
        expect_response_schema(checks, name, &response, 404, &contracts.not_found);
    }
}

/// Creates a protocol and captures its id.
async fn create_protocol(
    client: &ApiClient,
    contracts: &Contracts,
    checks: &mut CheckRecorder,
    rng: &mut StdRng,
) -> Option<String> {
    let name = "POST /v1/protocols";
    let body = json!({
        "protocolType": PROTOCOL_TYPE,
        "name": data::company_name(rng),
        "description": data::sentence(rng),
    });
    let response = expect_transport(checks, name, client.post("/v1/protocols", &body).await)?;
    expect_response_schema(checks, name, &response, 201, &contracts.protocol);
    captured_id(&response)
}

/// Creates a version under the protocol and captures the version id.
async fn create_protocol_version(
    client: &ApiClient,
    contracts: &Contracts,
    checks: &mut CheckRecorder,
    rng: &mut StdRng,
    protocol_id: Option<&str>,
) -> Option<String> {
    let name = "POST /v1/protocols/:id/versions";
    let id = require_fixture(checks, name, protocol_id)?;
    let body = json!({
        "version": data::version_string(rng),
        "description": data::sentence(rng),
    });
    let result = client.post(&format!("/v1/protocols/{id}/versions"), &body).await;
    let response = expect_transport(checks, name, result)?;
    expect_response_schema(checks, name, &response, 201, &contracts.protocol_version);
    captured_id(&response)
}
