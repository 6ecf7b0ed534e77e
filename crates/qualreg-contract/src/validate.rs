// crates/qualreg-contract/src/validate.rs
// ============================================================================
// Module: Contract Validation
// Description: Compiled validators with per-field violation reports.
// Purpose: Turn descriptors into Draft 2020-12 validators and pinpoint divergence.
// Dependencies: jsonschema, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`ContractValidator`] compiles an [`ObjectSchema`] once and is then
//! reused for every response it checks. Validation returns the full list of
//! violations with instance paths so a failure report can name the exact
//! property (or page item index) that diverged, never just pass/fail.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use jsonschema::Draft;
use jsonschema::Validator;
use serde_json::Value;
use thiserror::Error;

use crate::schema::ObjectSchema;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Error raised while preparing a contract for validation.
#[derive(Debug, Error)]
pub enum ContractError {
    /// The rendered schema document failed to compile.
    #[error("schema compilation failed: {0}")]
    Compile(String),
}

// ============================================================================
// SECTION: Violations
// ============================================================================

/// A single point of divergence between a response body and its contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// JSON pointer into the instance; empty for the document root.
    pub path: String,
    /// Human-readable description of the divergence.
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "body: {}", self.message)
        } else {
            write!(f, "body{}: {}", self.path, self.message)
        }
    }
}

// ============================================================================
// SECTION: Validator
// ============================================================================

/// Compiled response contract.
pub struct ContractValidator {
    /// Compiled Draft 2020-12 validator.
    validator: Validator,
}

impl fmt::Debug for ContractValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractValidator").finish_non_exhaustive()
    }
}

impl ContractValidator {
    /// Compiles a descriptor into a reusable validator.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Compile`] when the rendered document is not
    /// a valid Draft 2020-12 schema.
    pub fn new(schema: &ObjectSchema) -> Result<Self, ContractError> {
        let document = schema.to_value();
        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .build(&document)
            .map_err(|err| ContractError::Compile(err.to_string()))?;
        Ok(Self {
            validator,
        })
    }

    /// Validates an instance, returning every violation found.
    ///
    /// An empty vector means the instance conforms. Extra instance keys are
    /// permitted; only declared shapes and required names are enforced.
    #[must_use]
    pub fn check(&self, instance: &Value) -> Vec<SchemaViolation> {
        self.validator
            .iter_errors(instance)
            .map(|error| SchemaViolation {
                path: error.instance_path().to_string(),
                message: error.to_string(),
            })
            .collect()
    }

    /// Returns true when the instance conforms to the contract.
    #[must_use]
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }
}
