// crates/qualreg-contract/src/schema.rs
// ============================================================================
// Module: Schema Descriptors
// Description: JSON-Schema-like descriptors and the typed composition builder.
// Purpose: Model response shapes as immutable data with collision-safe merges.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! Descriptors mirror the subset of JSON Schema the suite needs: primitive
//! types, objects with required properties, and arrays with a single item
//! shape. Composition goes through [`ObjectSchemaBuilder`], which keeps the
//! base-then-extension ordering of `required` and rejects duplicate
//! property names at build time instead of silently overwriting.
//!
//! Invariants:
//! - Every name listed in `required` exists in the property map.
//! - Property order is insertion order; extensions always follow the base.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;

// ============================================================================
// SECTION: Descriptor Types
// ============================================================================

/// Shape descriptor for a single JSON value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schema {
    /// JSON string.
    String,
    /// JSON integer.
    Integer,
    /// JSON number (integer or float).
    Number,
    /// JSON boolean.
    Boolean,
    /// Any JSON value; used for heterogeneous fields such as error locations.
    Any,
    /// Value that may also be `null`.
    Nullable(Box<Schema>),
    /// JSON object with named properties.
    Object(ObjectSchema),
    /// JSON array with a uniform item shape.
    Array(ArraySchema),
}

impl Schema {
    /// Renders the descriptor as a JSON Schema fragment.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::String => json!({ "type": "string" }),
            Self::Integer => json!({ "type": "integer" }),
            Self::Number => json!({ "type": "number" }),
            Self::Boolean => json!({ "type": "boolean" }),
            Self::Any => json!({}),
            Self::Nullable(inner) => nullable_value(inner),
            Self::Object(object) => object.to_value(),
            Self::Array(array) => array.to_value(),
        }
    }
}

/// Renders a nullable wrapper by widening the inner `type` keyword.
fn nullable_value(inner: &Schema) -> Value {
    let mut rendered = inner.to_value();
    match rendered.get("type").cloned() {
        Some(Value::String(name)) => {
            if let Some(object) = rendered.as_object_mut() {
                object.insert("type".to_string(), json!([name, "null"]));
            }
            rendered
        }
        _ => json!({ "anyOf": [rendered, { "type": "null" }] }),
    }
}

/// Object descriptor: ordered properties plus the required-name list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSchema {
    /// Property names and shapes in declaration order.
    properties: Vec<(String, Schema)>,
    /// Required property names, base fields first, extensions after.
    required: Vec<String>,
}

impl ObjectSchema {
    /// Returns the required property names in declaration order.
    #[must_use]
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Returns true when the schema declares the named property.
    #[must_use]
    pub fn has_property(&self, name: &str) -> bool {
        self.properties.iter().any(|(existing, _)| existing == name)
    }

    /// Number of declared properties.
    #[must_use]
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Renders the descriptor as a JSON Schema document.
    ///
    /// Extra instance keys stay permitted: the origin service adds fields
    /// (timestamps, links) the contract does not pin down.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut properties = Map::new();
        for (name, schema) in &self.properties {
            properties.insert(name.clone(), schema.to_value());
        }
        json!({
            "type": "object",
            "properties": Value::Object(properties),
            "required": self.required,
        })
    }
}

/// Array descriptor with a single item shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArraySchema {
    /// Shape every array element must satisfy.
    items: Box<Schema>,
}

impl ArraySchema {
    /// Creates an array descriptor from its item shape.
    #[must_use]
    pub fn new(items: Schema) -> Self {
        Self {
            items: Box::new(items),
        }
    }

    /// Renders the descriptor as a JSON Schema fragment.
    #[must_use]
    pub fn to_value(&self) -> Value {
        json!({
            "type": "array",
            "items": self.items.to_value(),
        })
    }
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Error raised when schema composition is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaBuildError {
    /// A property name was declared twice; overwriting is never silent.
    #[error("duplicate schema property: {name}")]
    DuplicateProperty {
        /// The colliding property name.
        name: String,
    },
}

/// Typed builder merging a fixed base with named extension fields.
///
/// `required` is `[base fields..., extension fields...]` in declaration
/// order; building with no extensions yields exactly the base schema.
#[derive(Debug, Clone, Default)]
pub struct ObjectSchemaBuilder {
    /// Properties accumulated so far, in declaration order.
    properties: Vec<(String, Schema)>,
    /// Required names accumulated so far.
    required: Vec<String>,
}

impl ObjectSchemaBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a required property.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaBuildError::DuplicateProperty`] when the name is
    /// already declared.
    pub fn property(mut self, name: &str, schema: Schema) -> Result<Self, SchemaBuildError> {
        self.insert(name, schema)?;
        self.required.push(name.to_string());
        Ok(self)
    }

    /// Declares an optional property: present in the shape map, absent from
    /// `required`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaBuildError::DuplicateProperty`] when the name is
    /// already declared.
    pub fn optional(mut self, name: &str, schema: Schema) -> Result<Self, SchemaBuildError> {
        self.insert(name, schema)?;
        Ok(self)
    }

    /// Appends caller-supplied extension fields after the base fields.
    ///
    /// Extensions are required, matching the original contract where every
    /// extension key joined the `required` list.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaBuildError::DuplicateProperty`] when an extension
    /// collides with a base field or an earlier extension.
    pub fn extend(
        mut self,
        extensions: Vec<(String, Schema)>,
    ) -> Result<Self, SchemaBuildError> {
        for (name, schema) in extensions {
            self.insert(&name, schema)?;
            self.required.push(name);
        }
        Ok(self)
    }

    /// Finishes the builder into an immutable descriptor.
    #[must_use]
    pub fn build(self) -> ObjectSchema {
        ObjectSchema {
            properties: self.properties,
            required: self.required,
        }
    }

    /// Inserts a property, rejecting duplicates.
    fn insert(&mut self, name: &str, schema: Schema) -> Result<(), SchemaBuildError> {
        if self.properties.iter().any(|(existing, _)| existing == name) {
            return Err(SchemaBuildError::DuplicateProperty {
                name: name.to_string(),
            });
        }
        self.properties.push((name.to_string(), schema));
        Ok(())
    }
}
