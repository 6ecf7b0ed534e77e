// crates/qualreg-scenarios/src/suites/mod.rs
// ============================================================================
// Module: Scenario Suites
// Description: Per-resource scenario groups and the compiled contract set.
// Purpose: Run the full suite in order with one compiled validator per shape.
// Dependencies: qualreg-contract, tokio
// ============================================================================

//! ## Overview
//! Contracts compile once per run and are shared by every group. Groups
//! run in a fixed order (health first, applications last, since the
//! application flow creates prerequisite resources) with a configurable
//! pause between them, mirroring the pacing of the original load script.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod applications;
pub mod health;
pub mod protocols;
pub mod roles;
pub mod system_types;
pub mod vendors;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use qualreg_contract::ContractError;
use qualreg_contract::ContractValidator;
use qualreg_contract::SchemaBuildError;
use qualreg_contract::page_schema;
use qualreg_contract::resources;
use qualreg_contract::responses;
use rand::rngs::StdRng;
use thiserror::Error;
use tokio::time::sleep;

use crate::checks::CheckRecorder;
use crate::client::ApiClient;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Syntactically invalid identifier used for 422 probes.
pub const MALFORMED_ID: &str = "incorrect-id";
/// Well-formed UUID that no resource is ever assigned, used for 404 probes.
pub const UNASSIGNED_ID: &str = "ef0b6a18-b294-424e-979c-3dea57c33948";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Error raised while preparing the suite's contracts.
#[derive(Debug, Error)]
pub enum SuiteError {
    /// Schema composition failed.
    #[error("contract composition failed: {0}")]
    Compose(#[from] SchemaBuildError),
    /// Validator compilation failed.
    #[error(transparent)]
    Contract(#[from] ContractError),
}

// ============================================================================
// SECTION: Contracts
// ============================================================================

/// Compiled validators for every response shape the suite asserts.
#[derive(Debug)]
pub struct Contracts {
    /// Health probe contract.
    pub health: ContractValidator,
    /// Vendor resource contract (with nested applications).
    pub vendor: ContractValidator,
    /// Page of vendors.
    pub vendor_page: ContractValidator,
    /// Role resource contract.
    pub role: ContractValidator,
    /// Page of roles.
    pub role_page: ContractValidator,
    /// System type resource contract.
    pub system_type: ContractValidator,
    /// Page of system types.
    pub system_type_page: ContractValidator,
    /// Protocol resource contract (with nested versions).
    pub protocol: ContractValidator,
    /// Page of protocols.
    pub protocol_page: ContractValidator,
    /// Protocol version contract.
    pub protocol_version: ContractValidator,
    /// Application resource contract (with vendor and nested collections).
    pub application: ContractValidator,
    /// Page of applications.
    pub application_page: ContractValidator,
    /// Validation-error (422) contract.
    pub validation_error: ContractValidator,
    /// Not-found (404) contract.
    pub not_found: ContractValidator,
}

impl Contracts {
    /// Composes and compiles every contract the suite uses.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteError`] when composition or compilation fails.
    pub fn new() -> Result<Self, SuiteError> {
        let vendor = resources::vendor_contract()?;
        let role = resources::role_schema()?;
        let system_type = resources::system_type_schema()?;
        let protocol = resources::protocol_schema()?;
        let application = resources::application_contract()?;
        Ok(Self {
            health: ContractValidator::new(&resources::health_schema()?)?,
            vendor_page: ContractValidator::new(&page_schema(vendor.clone())?)?,
            vendor: ContractValidator::new(&vendor)?,
            role_page: ContractValidator::new(&page_schema(role.clone())?)?,
            role: ContractValidator::new(&role)?,
            system_type_page: ContractValidator::new(&page_schema(system_type.clone())?)?,
            system_type: ContractValidator::new(&system_type)?,
            protocol_page: ContractValidator::new(&page_schema(protocol.clone())?)?,
            protocol: ContractValidator::new(&protocol)?,
            protocol_version: ContractValidator::new(&resources::protocol_version_schema()?)?,
            application_page: ContractValidator::new(&page_schema(application.clone())?)?,
            application: ContractValidator::new(&application)?,
            validation_error: ContractValidator::new(&responses::validation_error_schema()?)?,
            not_found: ContractValidator::new(&responses::not_found_schema()?)?,
        })
    }
}

// ============================================================================
// SECTION: Suite Runner
// ============================================================================

/// Runs every scenario group once, in order, with a pause between groups.
pub async fn run_suite(
    client: &ApiClient,
    contracts: &Contracts,
    checks: &mut CheckRecorder,
    rng: &mut StdRng,
    group_sleep: Duration,
) {
    health::run(client, contracts, checks).await;
    pause(group_sleep).await;
    vendors::run(client, contracts, checks, rng).await;
    pause(group_sleep).await;
    roles::run(client, contracts, checks, rng).await;
    pause(group_sleep).await;
    system_types::run(client, contracts, checks, rng).await;
    pause(group_sleep).await;
    protocols::run(client, contracts, checks, rng).await;
    pause(group_sleep).await;
    applications::run(client, contracts, checks, rng).await;
}

/// Sleeps between groups; zero disables the pause.
async fn pause(group_sleep: Duration) {
    if !group_sleep.is_zero() {
        sleep(group_sleep).await;
    }
}
