//! Error handling for the attribute value system
//!
//! This module provides idiomatic Rust error types using thiserror for
//! better error messages and proper error chain handling. Errors that
//! concern a nested element carry the [`AttributePath`] to it.

use attr_types::AttributePath;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::{AttributeType, WireType};

/// Main error type for the attribute value system
#[derive(Error, Debug)]
pub enum AttrError {
    #[error("Type error: {0}")]
    Type(#[from] TypeError),

    #[error("Wire error: {0}")]
    Wire(#[from] WireError),

    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),

    #[error("Type expression error: {0}")]
    Parse(#[from] TypeParseError),

    #[error("JSON encoding error: {0}")]
    Json(#[from] JsonError),
}

/// Result alias for fallible attribute-system operations
pub type AttrResult<T> = Result<T, AttrError>;

/// Errors from constructing typed values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TypeError {
    #[error("element at {path} has type {found}, expected {expected}")]
    ElementTypeMismatch {
        path: AttributePath,
        expected: AttributeType,
        found: AttributeType,
    },

    #[error("declared attribute '{name}' is missing from the value")]
    MissingAttribute { name: String },

    #[error("value contains undeclared attribute '{name}'")]
    UndeclaredAttribute { name: String },

    #[error("float payload {value} is not finite or not representable")]
    NonRepresentableFloat { value: f64 },
}

/// Errors from assembling a wire value whose contents do not match its type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WireError {
    #[error("wire contents ({contents}) do not fit wire type {ty}")]
    ShapeMismatch { ty: WireType, contents: String },

    #[error("wire element at {path} has type {found}, expected {expected}")]
    ElementTypeMismatch {
        path: AttributePath,
        expected: WireType,
        found: WireType,
    },

    #[error("wire object is missing declared attribute '{name}'")]
    MissingAttribute { name: String },

    #[error("wire object contains undeclared attribute '{name}'")]
    UndeclaredAttribute { name: String },
}

/// Errors from decoding a wire or JSON tree back into a typed value
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("wire value at {path} has type {found}, expected {expected}")]
    WireTypeMismatch {
        path: AttributePath,
        expected: WireType,
        found: WireType,
    },

    #[error("number {value} at {path} is not an integer")]
    NumberNotAnInteger { path: AttributePath, value: Decimal },

    #[error("number {value} at {path} does not fit in {target}")]
    NumberOutOfRange {
        path: AttributePath,
        value: Decimal,
        target: &'static str,
    },

    #[error("object at {path} is missing declared attribute '{name}'")]
    MissingAttribute { path: AttributePath, name: String },

    #[error("object at {path} contains undeclared attribute '{name}'")]
    UndeclaredAttribute { path: AttributePath, name: String },

    #[error("JSON value at {path} is {found}, expected {expected}")]
    UnexpectedJson {
        path: AttributePath,
        expected: AttributeType,
        found: String,
    },

    #[error("cannot parse '{literal}' at {path} as a number")]
    NumberParse { path: AttributePath, literal: String },

    #[error("wire contents at {path} do not match their declared wire type")]
    MalformedWire { path: AttributePath },
}

/// Errors from parsing a type expression
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TypeParseError {
    #[error("invalid type expression: {message}")]
    Syntax { message: String },

    #[error("unexpected trailing input '{rest}' after type expression")]
    TrailingInput { rest: String },
}

/// Errors from rendering a wire value as JSON
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JsonError {
    #[error("unknown value at {path} has no JSON representation")]
    UnknownNotSerializable { path: AttributePath },
}
