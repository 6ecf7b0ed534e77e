// crates/qualreg-contract/src/resources.rs
// ============================================================================
// Module: Resource Schemas
// Description: Per-resource schema generators and composed contract instances.
// Purpose: Declare the response shape of every Qualification Register resource.
// Dependencies: schema
// ============================================================================

//! ## Overview
//! One generator per resource. Each generator fixes the base fields the
//! service always returns and accepts extension fields so composite
//! contracts can nest children: a vendor embeds its applications, an
//! application embeds its vendor, versions, roles, and system types.
//! Property names are the wire names (camelCase).

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::schema::ArraySchema;
use crate::schema::ObjectSchema;
use crate::schema::ObjectSchemaBuilder;
use crate::schema::Schema;
use crate::schema::SchemaBuildError;

// ============================================================================
// SECTION: Base Generators
// ============================================================================

/// Vendor base schema: `id`, `kvkNumber`, `tradeName`, `statutoryName`.
///
/// # Errors
///
/// Returns [`SchemaBuildError`] when an extension collides with a base field.
pub fn vendor_schema(extensions: Vec<(String, Schema)>) -> Result<ObjectSchema, SchemaBuildError> {
    Ok(ObjectSchemaBuilder::new()
        .property("id", Schema::String)?
        .property("kvkNumber", Schema::String)?
        .property("tradeName", Schema::String)?
        .property("statutoryName", Schema::String)?
        .extend(extensions)?
        .build())
}

/// Application base schema: `id`, `name`.
///
/// # Errors
///
/// Returns [`SchemaBuildError`] when an extension collides with a base field.
pub fn application_schema(
    extensions: Vec<(String, Schema)>,
) -> Result<ObjectSchema, SchemaBuildError> {
    Ok(ObjectSchemaBuilder::new()
        .property("id", Schema::String)?
        .property("name", Schema::String)?
        .extend(extensions)?
        .build())
}

/// Version base schema: `id`, `version`.
///
/// # Errors
///
/// Returns [`SchemaBuildError`] when an extension collides with a base field.
pub fn version_schema(extensions: Vec<(String, Schema)>) -> Result<ObjectSchema, SchemaBuildError> {
    Ok(ObjectSchemaBuilder::new()
        .property("id", Schema::String)?
        .property("version", Schema::String)?
        .extend(extensions)?
        .build())
}

/// Role schema; `description` is nullable in the origin service.
///
/// # Errors
///
/// Returns [`SchemaBuildError`] when composition is invalid.
pub fn role_schema() -> Result<ObjectSchema, SchemaBuildError> {
    Ok(ObjectSchemaBuilder::new()
        .property("id", Schema::String)?
        .property("name", Schema::String)?
        .optional("description", Schema::Nullable(Box::new(Schema::String)))?
        .build())
}

/// System type schema; `description` is nullable in the origin service.
///
/// # Errors
///
/// Returns [`SchemaBuildError`] when composition is invalid.
pub fn system_type_schema() -> Result<ObjectSchema, SchemaBuildError> {
    Ok(ObjectSchemaBuilder::new()
        .property("id", Schema::String)?
        .property("name", Schema::String)?
        .optional("description", Schema::Nullable(Box::new(Schema::String)))?
        .build())
}

/// Protocol version schema: `id`, `version`, `description`.
///
/// # Errors
///
/// Returns [`SchemaBuildError`] when composition is invalid.
pub fn protocol_version_schema() -> Result<ObjectSchema, SchemaBuildError> {
    Ok(ObjectSchemaBuilder::new()
        .property("id", Schema::String)?
        .property("version", Schema::String)?
        .property("description", Schema::String)?
        .build())
}

/// Protocol schema embedding its versions array.
///
/// # Errors
///
/// Returns [`SchemaBuildError`] when composition is invalid.
pub fn protocol_schema() -> Result<ObjectSchema, SchemaBuildError> {
    Ok(ObjectSchemaBuilder::new()
        .property("id", Schema::String)?
        .property("name", Schema::String)?
        .property("description", Schema::String)?
        .property("protocolType", Schema::String)?
        .property(
            "versions",
            Schema::Array(ArraySchema::new(Schema::Object(protocol_version_schema()?))),
        )?
        .build())
}

/// Health probe schema: a single required `status` string.
///
/// # Errors
///
/// Returns [`SchemaBuildError`] when composition is invalid.
pub fn health_schema() -> Result<ObjectSchema, SchemaBuildError> {
    Ok(ObjectSchemaBuilder::new().property("status", Schema::String)?.build())
}

// ============================================================================
// SECTION: Composed Contracts
// ============================================================================

/// Vendor contract with nested applications (each carrying versions, roles,
/// and system types).
///
/// # Errors
///
/// Returns [`SchemaBuildError`] when composition is invalid.
pub fn vendor_contract() -> Result<ObjectSchema, SchemaBuildError> {
    let nested_application = application_schema(vec![
        (
            "versions".to_string(),
            Schema::Array(ArraySchema::new(Schema::Object(version_schema(Vec::new())?))),
        ),
        ("roles".to_string(), Schema::Array(ArraySchema::new(Schema::Object(role_schema()?)))),
        (
            "systemTypes".to_string(),
            Schema::Array(ArraySchema::new(Schema::Object(system_type_schema()?))),
        ),
    ])?;
    vendor_schema(vec![(
        "applications".to_string(),
        Schema::Array(ArraySchema::new(Schema::Object(nested_application))),
    )])
}

/// Application contract with the owning vendor and nested collections.
///
/// # Errors
///
/// Returns [`SchemaBuildError`] when composition is invalid.
pub fn application_contract() -> Result<ObjectSchema, SchemaBuildError> {
    application_schema(vec![
        ("vendor".to_string(), Schema::Object(vendor_schema(Vec::new())?)),
        (
            "versions".to_string(),
            Schema::Array(ArraySchema::new(Schema::Object(version_schema(Vec::new())?))),
        ),
        ("roles".to_string(), Schema::Array(ArraySchema::new(Schema::Object(role_schema()?)))),
        (
            "systemTypes".to_string(),
            Schema::Array(ArraySchema::new(Schema::Object(system_type_schema()?))),
        ),
    ])
}
