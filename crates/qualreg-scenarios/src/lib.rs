// crates/qualreg-scenarios/src/lib.rs
// ============================================================================
// Module: Qualification Register Scenarios Library
// Description: Scenario groups exercising the Qualification Register API.
// Purpose: Issue sequenced requests, record checks, and capture latency samples.
// Dependencies: qualreg-contract, rand, reqwest, serde, tokio
// ============================================================================

//! ## Overview
//! One scenario group per resource, each a strict sequence of steps that
//! thread created-entity ids forward: create, list, read, mutate or delete,
//! then the error paths. Assertions record check outcomes instead of
//! raising; a failing check never prevents sibling checks or later groups
//! from running. Every virtual user owns an independent client, recorder,
//! and fixture state.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod checks;
pub mod client;
pub mod data;
pub mod expect;
pub mod fixtures;
pub mod metrics;
pub mod suites;

pub use checks::CheckFailure;
pub use checks::CheckRecorder;
pub use checks::CheckReport;
pub use client::ApiClient;
pub use client::ApiResponse;
pub use client::ClientError;
pub use client::RequestSample;
pub use metrics::LatencyStats;
pub use suites::Contracts;
pub use suites::SuiteError;
pub use suites::run_suite;
