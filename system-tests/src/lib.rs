// system-tests/src/lib.rs
// ============================================================================
// Module: Qualification Register System Tests Library
// Description: Shared helpers for driving the suite against an in-process stub.
// Purpose: Provide readiness polling reused by every test binary.
// Dependencies: qualreg-scenarios, tokio
// ============================================================================

//! ## Overview
//! This crate hosts the shared pieces the system-test binaries in
//! `system-tests/tests` reuse. The stub service itself lives in the test
//! helpers; readiness polling lives here so each binary can wait for the
//! stub without arbitrary sleeps.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod readiness;
