// crates/qualreg-config/src/lib.rs
// ============================================================================
// Module: Qualification Register Config Library
// Description: Environment-backed configuration for contract and load runs.
// Purpose: Provide typed access to run settings with fail-closed parsing.
// Dependencies: thiserror, url
// ============================================================================

//! ## Overview
//! Run configuration is read from environment variables and mapped into a
//! small typed structure shared by the CLI runner and the system-test
//! harness. Values are parsed with strict UTF-8 enforcement and bounded
//! validation; anything invalid fails closed rather than defaulting.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod env;
pub mod thresholds;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use env::ConfigError;
pub use env::DEFAULT_ENDPOINT_URL;
pub use env::LoadConfig;
pub use env::LoadTestEnv;
pub use env::read_env_strict;
pub use thresholds::ThresholdBreach;
pub use thresholds::Thresholds;
