// system-tests/tests/suites/protocols.rs
// ============================================================================
// Module: Protocols Tests
// Description: Protocol and nested version lifecycle against the stub service.
// ============================================================================

//! ## Overview
//! Runs the protocols scenario group end to end, then replays the nested
//! lifecycle directly: version deleted before parent, both with empty 204
//! bodies, and the parent unreachable afterwards.

use qualreg_scenarios::checks::CheckRecorder;
use qualreg_scenarios::suites::protocols;
use serde_json::json;

use crate::helpers::harness;
use crate::helpers::stub_server::StubOptions;

#[tokio::test(flavor = "multi_thread")]
async fn protocols_group_passes_against_stub() -> Result<(), Box<dyn std::error::Error>> {
    let mut suite = harness::start(StubOptions::default(), 41).await?;
    let mut checks = CheckRecorder::new();
    protocols::run(&suite.client, &suite.contracts, &mut checks, &mut suite.rng).await;
    harness::demand_clean(&checks.into_report(), 8)?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn child_version_deletes_before_parent() -> Result<(), Box<dyn std::error::Error>> {
    let suite = harness::start(StubOptions::default(), 42).await?;
    let created = suite
        .client
        .post(
            "/v1/protocols",
            &json!({
                "protocolType": "InformationStandard",
                "name": "Medicatieproces",
                "description": "informatiestandaard medicatieproces",
            }),
        )
        .await?;
    if created.status != 201 {
        return Err(format!("protocol create failed with status {}", created.status).into());
    }
    let protocol_id = created
        .body
        .as_ref()
        .and_then(|value| value.get("id"))
        .and_then(serde_json::Value::as_str)
        .ok_or("protocol response missing id")?
        .to_string();

    let version = suite
        .client
        .post(
            &format!("/v1/protocols/{protocol_id}/versions"),
            &json!({ "version": "v1.0.0", "description": "eerste versie" }),
        )
        .await?;
    if version.status != 201 {
        return Err(format!("version create failed with status {}", version.status).into());
    }
    let version_id = version
        .body
        .as_ref()
        .and_then(|value| value.get("id"))
        .and_then(serde_json::Value::as_str)
        .ok_or("version response missing id")?
        .to_string();

    let deleted_version = suite
        .client
        .delete(&format!("/v1/protocols/{protocol_id}/versions/{version_id}"))
        .await?;
    if deleted_version.status != 204 || deleted_version.body_len != 0 {
        return Err("version delete must answer 204 with an empty body".into());
    }

    let deleted_protocol = suite.client.delete(&format!("/v1/protocols/{protocol_id}")).await?;
    if deleted_protocol.status != 204 || deleted_protocol.body_len != 0 {
        return Err("protocol delete must answer 204 with an empty body".into());
    }

    let fetched = suite.client.get(&format!("/v1/protocols/{protocol_id}")).await?;
    if fetched.status != 404 {
        return Err(format!("expected 404 after delete, got {}", fetched.status).into());
    }
    Ok(())
}
