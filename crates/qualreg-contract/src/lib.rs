// crates/qualreg-contract/src/lib.rs
// ============================================================================
// Module: Qualification Register Contract Library
// Description: Declarative response contracts for the Qualification Register API.
// Purpose: Provide schema descriptors, composition, and response validation.
// Dependencies: jsonschema, serde_json, thiserror
// ============================================================================

//! ## Overview
//! This crate holds the declarative side of the suite: JSON-Schema-like
//! descriptors for every resource the Qualification Register API returns,
//! a typed builder that composes base schemas with caller-supplied
//! extension fields, the pagination envelope shared by all list endpoints,
//! and a validator that reports per-field divergences instead of a bare
//! pass/fail. Descriptors are constructed once at suite setup and are
//! immutable afterwards.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod page;
pub mod resources;
pub mod responses;
pub mod schema;
pub mod validate;

pub use page::page_schema;
pub use schema::ArraySchema;
pub use schema::ObjectSchema;
pub use schema::ObjectSchemaBuilder;
pub use schema::Schema;
pub use schema::SchemaBuildError;
pub use validate::ContractError;
pub use validate::ContractValidator;
pub use validate::SchemaViolation;
