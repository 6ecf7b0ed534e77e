// crates/qualreg-contract/src/responses.rs
// ============================================================================
// Module: Default Response Schemas
// Description: Error-path response shapes shared across resources.
// Purpose: Declare the 422 validation-error and 404 not-found contracts.
// Dependencies: schema
// ============================================================================

//! ## Overview
//! The service reports a malformed identifier or payload as a 422 whose
//! `detail` is a list of `{loc, msg, type}` entries, and a missing resource
//! as a 404 whose `detail` is a plain message string. `loc` entries mix
//! strings and array indices, so their item shape is unconstrained.

use crate::schema::ArraySchema;
use crate::schema::ObjectSchema;
use crate::schema::ObjectSchemaBuilder;
use crate::schema::Schema;
use crate::schema::SchemaBuildError;

/// Validation-error (422) response schema.
///
/// # Errors
///
/// Returns [`SchemaBuildError`] when composition is invalid.
pub fn validation_error_schema() -> Result<ObjectSchema, SchemaBuildError> {
    let entry = ObjectSchemaBuilder::new()
        .property("loc", Schema::Array(ArraySchema::new(Schema::Any)))?
        .property("msg", Schema::String)?
        .property("type", Schema::String)?
        .build();
    Ok(ObjectSchemaBuilder::new()
        .property("detail", Schema::Array(ArraySchema::new(Schema::Object(entry))))?
        .build())
}

/// Not-found (404) response schema.
///
/// # Errors
///
/// Returns [`SchemaBuildError`] when composition is invalid.
pub fn not_found_schema() -> Result<ObjectSchema, SchemaBuildError> {
    Ok(ObjectSchemaBuilder::new().property("detail", Schema::String)?.build())
}
