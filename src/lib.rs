//! attrval - Schema-Aware Tri-State Attribute Values
//!
//! This crate provides the attribute value model for status-board style
//! configuration tooling: every value is unknown, null, or known with a
//! typed payload; composite values carry their element types so that
//! empty and absent collections still round-trip; and a validation pass
//! reports element-level constraint violations with precise paths.
//!
//! ## Call Chain
//! Typed construction -> validation -> wire tree -> JSON (and back)
//!
//! ## Quick Start
//!
//! ```rust
//! use attrval::{validate, AttributeType, SetValue, StringValue, Value};
//!
//! let tags = SetValue::known(
//!     AttributeType::String,
//!     vec![
//!         StringValue::known("prod").into(),
//!         StringValue::known("prod").into(),
//!     ],
//! )
//! .unwrap();
//!
//! let diagnostics = validate(&Value::Set(tags));
//! assert!(diagnostics.has_errors());
//! ```

// Core error handling
pub mod error;

// Type descriptors and the type-expression parser
pub mod types;

// Tri-state value wrappers
pub mod value;

// Wire-value tree and JSON bridging
pub mod wire;

// Element-level validation pass
pub mod validation;

// Public re-exports for the crate surface
pub use error::{
    AttrError, AttrResult, ConversionError, JsonError, TypeError, TypeParseError, WireError,
};
pub use types::{AttributeType, WireType};
pub use validation::validate;
pub use value::{
    BoolValue, Float64Value, Int64Value, ListValue, MapValue, NumberValue, ObjectValue, SetValue,
    StringValue, Value, ValueState,
};
pub use wire::json::{from_json, to_json};
pub use wire::{WireContents, WireValue};

// Foundation types - paths, severities, diagnostics
pub use attr_types::{AttributePath, Diagnostic, Diagnostics, PathStep, Severity};
