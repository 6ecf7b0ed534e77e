// crates/qualreg-contract/src/page.rs
// ============================================================================
// Module: Page Envelope
// Description: Pagination envelope wrapper shared by all list endpoints.
// Purpose: Wrap any item schema in the service's page response shape.
// Dependencies: schema
// ============================================================================

//! ## Overview
//! Every `GET /v1/<resource>` collection returns the same envelope:
//! `items` plus `limit`, `offset`, and `total` counters. Item validation is
//! fully delegated to the wrapped schema, so one wrapper serves every list
//! endpoint unchanged.

use crate::schema::ArraySchema;
use crate::schema::ObjectSchema;
use crate::schema::ObjectSchemaBuilder;
use crate::schema::Schema;
use crate::schema::SchemaBuildError;

/// Wraps an item schema in the pagination envelope.
///
/// # Errors
///
/// Returns [`SchemaBuildError`] when composition is invalid.
pub fn page_schema(item: ObjectSchema) -> Result<ObjectSchema, SchemaBuildError> {
    Ok(ObjectSchemaBuilder::new()
        .property("items", Schema::Array(ArraySchema::new(Schema::Object(item))))?
        .property("limit", Schema::Integer)?
        .property("offset", Schema::Integer)?
        .property("total", Schema::Integer)?
        .build())
}
