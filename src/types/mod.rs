//! Attribute type descriptors
//!
//! An [`AttributeType`] describes the schema-level shape of a value:
//! which primitive it is, or which element/attribute types a collection
//! carries. Null and unknown collections still hold their descriptor so
//! they know how to round-trip through the wire format.
//!
//! [`WireType`] is the wire-level projection of an [`AttributeType`]:
//! the 64-bit refinements `int64` and `float64` exist only at the value
//! layer and both project to `number` on the wire.

pub mod parser;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::TypeParseError;
use crate::value::{
    BoolValue, Float64Value, Int64Value, ListValue, MapValue, NumberValue, ObjectValue, SetValue,
    StringValue, Value,
};

/// Schema-level type descriptor for an attribute value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeType {
    Bool,
    String,
    Number,
    Int64,
    Float64,
    List(Box<AttributeType>),
    Set(Box<AttributeType>),
    Map(Box<AttributeType>),
    Object(BTreeMap<String, AttributeType>),
}

impl AttributeType {
    /// Convenience constructor for list types
    pub fn list_of(element: AttributeType) -> Self {
        AttributeType::List(Box::new(element))
    }

    /// Convenience constructor for set types
    pub fn set_of(element: AttributeType) -> Self {
        AttributeType::Set(Box::new(element))
    }

    /// Convenience constructor for map types
    pub fn map_of(element: AttributeType) -> Self {
        AttributeType::Map(Box::new(element))
    }

    /// Convenience constructor for object types
    pub fn object_of<I, S>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (S, AttributeType)>,
        S: Into<String>,
    {
        AttributeType::Object(
            attributes
                .into_iter()
                .map(|(name, ty)| (name.into(), ty))
                .collect(),
        )
    }

    /// Whether this type holds nested values
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            AttributeType::List(_)
                | AttributeType::Set(_)
                | AttributeType::Map(_)
                | AttributeType::Object(_)
        )
    }

    /// Element type of a list, set, or map
    pub fn element_type(&self) -> Option<&AttributeType> {
        match self {
            AttributeType::List(elem) | AttributeType::Set(elem) | AttributeType::Map(elem) => {
                Some(elem)
            }
            _ => None,
        }
    }

    /// Attribute name to type mapping of an object
    pub fn attribute_types(&self) -> Option<&BTreeMap<String, AttributeType>> {
        match self {
            AttributeType::Object(attrs) => Some(attrs),
            _ => None,
        }
    }

    /// Project to the wire-level type. Total and idempotent: the 64-bit
    /// refinements collapse to `number`, everything else maps structurally.
    pub fn wire_type(&self) -> WireType {
        match self {
            AttributeType::Bool => WireType::Bool,
            AttributeType::String => WireType::String,
            AttributeType::Number | AttributeType::Int64 | AttributeType::Float64 => {
                WireType::Number
            }
            AttributeType::List(elem) => WireType::List(Box::new(elem.wire_type())),
            AttributeType::Set(elem) => WireType::Set(Box::new(elem.wire_type())),
            AttributeType::Map(elem) => WireType::Map(Box::new(elem.wire_type())),
            AttributeType::Object(attrs) => WireType::Object(
                attrs
                    .iter()
                    .map(|(name, ty)| (name.clone(), ty.wire_type()))
                    .collect(),
            ),
        }
    }

    /// A null value of this type
    pub fn null_value(&self) -> Value {
        match self {
            AttributeType::Bool => Value::Bool(BoolValue::null()),
            AttributeType::String => Value::String(StringValue::null()),
            AttributeType::Number => Value::Number(NumberValue::null()),
            AttributeType::Int64 => Value::Int64(Int64Value::null()),
            AttributeType::Float64 => Value::Float64(Float64Value::null()),
            AttributeType::List(elem) => Value::List(ListValue::null((**elem).clone())),
            AttributeType::Set(elem) => Value::Set(SetValue::null((**elem).clone())),
            AttributeType::Map(elem) => Value::Map(MapValue::null((**elem).clone())),
            AttributeType::Object(attrs) => Value::Object(ObjectValue::null(attrs.clone())),
        }
    }

    /// An unknown value of this type
    pub fn unknown_value(&self) -> Value {
        match self {
            AttributeType::Bool => Value::Bool(BoolValue::unknown()),
            AttributeType::String => Value::String(StringValue::unknown()),
            AttributeType::Number => Value::Number(NumberValue::unknown()),
            AttributeType::Int64 => Value::Int64(Int64Value::unknown()),
            AttributeType::Float64 => Value::Float64(Float64Value::unknown()),
            AttributeType::List(elem) => Value::List(ListValue::unknown((**elem).clone())),
            AttributeType::Set(elem) => Value::Set(SetValue::unknown((**elem).clone())),
            AttributeType::Map(elem) => Value::Map(MapValue::unknown((**elem).clone())),
            AttributeType::Object(attrs) => Value::Object(ObjectValue::unknown(attrs.clone())),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeType::Bool => write!(f, "bool"),
            AttributeType::String => write!(f, "string"),
            AttributeType::Number => write!(f, "number"),
            AttributeType::Int64 => write!(f, "int64"),
            AttributeType::Float64 => write!(f, "float64"),
            AttributeType::List(elem) => write!(f, "list({})", elem),
            AttributeType::Set(elem) => write!(f, "set({})", elem),
            AttributeType::Map(elem) => write!(f, "map({})", elem),
            AttributeType::Object(attrs) => {
                write!(f, "object({{")?;
                for (i, (name, ty)) in attrs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} = {}", name, ty)?;
                }
                write!(f, "}})")
            }
        }
    }
}

impl FromStr for AttributeType {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parser::parse_type(s)
    }
}

/// Wire-level type descriptor: the shape of a [`crate::wire::WireValue`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WireType {
    Bool,
    String,
    Number,
    List(Box<WireType>),
    Set(Box<WireType>),
    Map(Box<WireType>),
    Object(BTreeMap<String, WireType>),
}

impl WireType {
    /// Element type of a list, set, or map
    pub fn element_type(&self) -> Option<&WireType> {
        match self {
            WireType::List(elem) | WireType::Set(elem) | WireType::Map(elem) => Some(elem),
            _ => None,
        }
    }

    /// Attribute name to type mapping of an object
    pub fn attribute_types(&self) -> Option<&BTreeMap<String, WireType>> {
        match self {
            WireType::Object(attrs) => Some(attrs),
            _ => None,
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireType::Bool => write!(f, "bool"),
            WireType::String => write!(f, "string"),
            WireType::Number => write!(f, "number"),
            WireType::List(elem) => write!(f, "list({})", elem),
            WireType::Set(elem) => write!(f, "set({})", elem),
            WireType::Map(elem) => write!(f, "map({})", elem),
            WireType::Object(attrs) => {
                write!(f, "object({{")?;
                for (i, (name, ty)) in attrs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} = {}", name, ty)?;
                }
                write!(f, "}})")
            }
        }
    }
}
