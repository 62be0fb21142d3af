//! Generic wire-value tree
//!
//! [`WireValue`] is the transport-level representation of an attribute
//! value: a type descriptor plus contents, where the contents are unknown,
//! null, a primitive payload, or a tree of further wire values. The 64-bit
//! refinements do not exist at this level; both encode as `number` and are
//! re-refined on decode.
//!
//! Encoding ([`Value::to_wire`]) is total: typed values are shape-correct
//! by construction. Decoding ([`Value::from_wire`]) is schema-directed and
//! fails with a path-carrying [`ConversionError`] on any mismatch.

pub mod json;

use attr_types::AttributePath;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{ConversionError, WireError};
use crate::types::{AttributeType, WireType};
use crate::value::{
    BoolValue, Float64Value, Int64Value, ListValue, MapValue, NumberValue, ObjectValue, SetValue,
    StringValue, Value, ValueState,
};

/// Contents of a wire value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WireContents {
    Unknown,
    Null,
    Bool(bool),
    String(String),
    Number(Decimal),
    /// List and set elements, in order
    Elements(Vec<WireValue>),
    /// Map entries or object attributes
    Pairs(BTreeMap<String, WireValue>),
}

impl WireContents {
    /// Short description of the contents kind, for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            WireContents::Unknown => "unknown",
            WireContents::Null => "null",
            WireContents::Bool(_) => "bool",
            WireContents::String(_) => "string",
            WireContents::Number(_) => "number",
            WireContents::Elements(_) => "elements",
            WireContents::Pairs(_) => "pairs",
        }
    }
}

/// A typed node in the wire-value tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireValue {
    ty: WireType,
    contents: WireContents,
}

impl WireValue {
    /// Assemble a wire value, rejecting contents that do not fit the type
    pub fn new(ty: WireType, contents: WireContents) -> Result<Self, WireError> {
        Self::check_shape(&ty, &contents)?;
        Ok(Self { ty, contents })
    }

    pub(crate) fn assemble(ty: WireType, contents: WireContents) -> Self {
        Self { ty, contents }
    }

    pub fn ty(&self) -> &WireType {
        &self.ty
    }

    pub fn contents(&self) -> &WireContents {
        &self.contents
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self.contents, WireContents::Unknown)
    }

    pub fn is_null(&self) -> bool {
        matches!(self.contents, WireContents::Null)
    }

    fn check_shape(ty: &WireType, contents: &WireContents) -> Result<(), WireError> {
        // unknown and null fit every type
        if matches!(contents, WireContents::Unknown | WireContents::Null) {
            return Ok(());
        }
        match (ty, contents) {
            (WireType::Bool, WireContents::Bool(_)) => Ok(()),
            (WireType::String, WireContents::String(_)) => Ok(()),
            (WireType::Number, WireContents::Number(_)) => Ok(()),
            (WireType::List(element) | WireType::Set(element), WireContents::Elements(children)) => {
                for (index, child) in children.iter().enumerate() {
                    if child.ty != **element {
                        return Err(WireError::ElementTypeMismatch {
                            path: AttributePath::root().index(index),
                            expected: (**element).clone(),
                            found: child.ty.clone(),
                        });
                    }
                }
                Ok(())
            }
            (WireType::Map(element), WireContents::Pairs(children)) => {
                for (key, child) in children.iter() {
                    if child.ty != **element {
                        return Err(WireError::ElementTypeMismatch {
                            path: AttributePath::root().key(key.clone()),
                            expected: (**element).clone(),
                            found: child.ty.clone(),
                        });
                    }
                }
                Ok(())
            }
            (WireType::Object(declared), WireContents::Pairs(children)) => {
                for name in declared.keys() {
                    if !children.contains_key(name) {
                        return Err(WireError::MissingAttribute { name: name.clone() });
                    }
                }
                for (name, child) in children.iter() {
                    let expected = declared
                        .get(name)
                        .ok_or_else(|| WireError::UndeclaredAttribute { name: name.clone() })?;
                    if child.ty != *expected {
                        return Err(WireError::ElementTypeMismatch {
                            path: AttributePath::root().attribute(name.clone()),
                            expected: expected.clone(),
                            found: child.ty.clone(),
                        });
                    }
                }
                Ok(())
            }
            (ty, contents) => Err(WireError::ShapeMismatch {
                ty: ty.clone(),
                contents: contents.kind().to_string(),
            }),
        }
    }
}

impl fmt::Display for WireValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.contents {
            WireContents::Unknown => write!(f, "<unknown>"),
            WireContents::Null => write!(f, "null"),
            WireContents::Bool(b) => write!(f, "{}", b),
            WireContents::String(s) => write!(f, "{:?}", s),
            WireContents::Number(n) => write!(f, "{}", n),
            WireContents::Elements(children) => {
                write!(f, "[")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", child)?;
                }
                write!(f, "]")
            }
            WireContents::Pairs(children) => {
                write!(f, "{{")?;
                for (i, (key, child)) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} = {}", key, child)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl Value {
    /// Encode into the wire-value tree. Total: every well-typed value has
    /// a wire form.
    pub fn to_wire(&self) -> WireValue {
        let ty = self.attribute_type().wire_type();
        let contents = match self {
            Value::Bool(v) => match v.state() {
                ValueState::Unknown => WireContents::Unknown,
                ValueState::Null => WireContents::Null,
                ValueState::Known(b) => WireContents::Bool(*b),
            },
            Value::String(v) => match v.state() {
                ValueState::Unknown => WireContents::Unknown,
                ValueState::Null => WireContents::Null,
                ValueState::Known(s) => WireContents::String(s.clone()),
            },
            Value::Number(v) => match v.state() {
                ValueState::Unknown => WireContents::Unknown,
                ValueState::Null => WireContents::Null,
                ValueState::Known(n) => WireContents::Number(*n),
            },
            Value::Int64(v) => match v.state() {
                ValueState::Unknown => WireContents::Unknown,
                ValueState::Null => WireContents::Null,
                ValueState::Known(i) => WireContents::Number(Decimal::from(*i)),
            },
            Value::Float64(v) => match v.state() {
                ValueState::Unknown => WireContents::Unknown,
                ValueState::Null => WireContents::Null,
                // representability is checked by Float64Value::known
                ValueState::Known(x) => WireContents::Number(
                    Decimal::from_f64(*x).expect("float payload validated at construction"),
                ),
            },
            Value::List(list) => match list.elements() {
                None if list.is_unknown() => WireContents::Unknown,
                None => WireContents::Null,
                Some(elements) => {
                    WireContents::Elements(elements.iter().map(Value::to_wire).collect())
                }
            },
            Value::Set(set) => match set.elements() {
                None if set.is_unknown() => WireContents::Unknown,
                None => WireContents::Null,
                Some(elements) => {
                    WireContents::Elements(elements.iter().map(Value::to_wire).collect())
                }
            },
            Value::Map(map) => match map.entries() {
                None if map.is_unknown() => WireContents::Unknown,
                None => WireContents::Null,
                Some(entries) => WireContents::Pairs(
                    entries
                        .iter()
                        .map(|(key, value)| (key.clone(), value.to_wire()))
                        .collect(),
                ),
            },
            Value::Object(object) => match object.attributes() {
                None if object.is_unknown() => WireContents::Unknown,
                None => WireContents::Null,
                Some(attributes) => WireContents::Pairs(
                    attributes
                        .iter()
                        .map(|(name, value)| (name.clone(), value.to_wire()))
                        .collect(),
                ),
            },
        };
        WireValue { ty, contents }
    }

    /// Decode a wire value against a schema type.
    ///
    /// The wire type must be exactly the schema type's wire projection;
    /// `int64` and `float64` re-refine wire numbers with integrality and
    /// range checks.
    pub fn from_wire(ty: &AttributeType, wire: &WireValue) -> Result<Value, ConversionError> {
        from_wire_at(ty, wire, &AttributePath::root())
    }
}

fn from_wire_at(
    ty: &AttributeType,
    wire: &WireValue,
    path: &AttributePath,
) -> Result<Value, ConversionError> {
    let expected_wire = ty.wire_type();
    if wire.ty != expected_wire {
        return Err(ConversionError::WireTypeMismatch {
            path: path.clone(),
            expected: expected_wire,
            found: wire.ty.clone(),
        });
    }

    match &wire.contents {
        WireContents::Unknown => return Ok(ty.unknown_value()),
        WireContents::Null => return Ok(ty.null_value()),
        _ => {}
    }

    let malformed = || ConversionError::MalformedWire { path: path.clone() };

    match ty {
        AttributeType::Bool => match &wire.contents {
            WireContents::Bool(b) => Ok(Value::Bool(BoolValue::known(*b))),
            _ => Err(malformed()),
        },
        AttributeType::String => match &wire.contents {
            WireContents::String(s) => Ok(Value::String(StringValue::known(s.clone()))),
            _ => Err(malformed()),
        },
        AttributeType::Number => match &wire.contents {
            WireContents::Number(n) => Ok(Value::Number(NumberValue::known(*n))),
            _ => Err(malformed()),
        },
        AttributeType::Int64 => match &wire.contents {
            WireContents::Number(n) => {
                if !n.fract().is_zero() {
                    return Err(ConversionError::NumberNotAnInteger {
                        path: path.clone(),
                        value: *n,
                    });
                }
                let integer = n.to_i64().ok_or(ConversionError::NumberOutOfRange {
                    path: path.clone(),
                    value: *n,
                    target: "int64",
                })?;
                Ok(Value::Int64(Int64Value::known(integer)))
            }
            _ => Err(malformed()),
        },
        AttributeType::Float64 => match &wire.contents {
            WireContents::Number(n) => {
                let float = n.to_f64().ok_or(ConversionError::NumberOutOfRange {
                    path: path.clone(),
                    value: *n,
                    target: "float64",
                })?;
                let value = Float64Value::known(float).map_err(|_| {
                    ConversionError::NumberOutOfRange {
                        path: path.clone(),
                        value: *n,
                        target: "float64",
                    }
                })?;
                Ok(Value::Float64(value))
            }
            _ => Err(malformed()),
        },
        AttributeType::List(element) => match &wire.contents {
            WireContents::Elements(children) => {
                let mut elements = Vec::with_capacity(children.len());
                for (index, child) in children.iter().enumerate() {
                    elements.push(from_wire_at(element, child, &path.index(index))?);
                }
                Ok(Value::List(ListValue::known_unchecked(
                    (**element).clone(),
                    elements,
                )))
            }
            _ => Err(malformed()),
        },
        AttributeType::Set(element) => match &wire.contents {
            WireContents::Elements(children) => {
                let mut elements = Vec::with_capacity(children.len());
                for child in children.iter() {
                    elements.push(from_wire_at(
                        element,
                        child,
                        &path.set_element(child.to_string()),
                    )?);
                }
                Ok(Value::Set(SetValue::known_unchecked(
                    (**element).clone(),
                    elements,
                )))
            }
            _ => Err(malformed()),
        },
        AttributeType::Map(element) => match &wire.contents {
            WireContents::Pairs(children) => {
                let mut entries = BTreeMap::new();
                for (key, child) in children.iter() {
                    let value = from_wire_at(element, child, &path.key(key.clone()))?;
                    entries.insert(key.clone(), value);
                }
                Ok(Value::Map(MapValue::known_unchecked(
                    (**element).clone(),
                    entries,
                )))
            }
            _ => Err(malformed()),
        },
        AttributeType::Object(declared) => match &wire.contents {
            WireContents::Pairs(children) => {
                for name in declared.keys() {
                    if !children.contains_key(name) {
                        return Err(ConversionError::MissingAttribute {
                            path: path.clone(),
                            name: name.clone(),
                        });
                    }
                }
                let mut attributes = BTreeMap::new();
                for (name, child) in children.iter() {
                    let attr_ty =
                        declared
                            .get(name)
                            .ok_or_else(|| ConversionError::UndeclaredAttribute {
                                path: path.clone(),
                                name: name.clone(),
                            })?;
                    let value = from_wire_at(attr_ty, child, &path.attribute(name.clone()))?;
                    attributes.insert(name.clone(), value);
                }
                Ok(Value::Object(ObjectValue::known_unchecked(
                    declared.clone(),
                    attributes,
                )))
            }
            _ => Err(malformed()),
        },
    }
}
