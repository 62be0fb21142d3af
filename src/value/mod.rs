//! Tri-state attribute values
//!
//! Every value in the system is in exactly one of three states: unknown
//! (not yet resolved, e.g. computed downstream), null (explicitly absent),
//! or known with a typed payload. The invariant is structural:
//! [`ValueState`] is an enum, so no wrapper can be simultaneously null and
//! known.
//!
//! [`Value`] is the dynamic view over the nine wrappers; it is what
//! collections hold and what the wire and validation passes walk.

mod collection;
mod object;
mod primitive;

pub use collection::{ListValue, MapValue, SetValue};
pub use object::ObjectValue;
pub use primitive::{BoolValue, Float64Value, Int64Value, NumberValue, StringValue};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::AttributeType;

/// The shared tri-state: exactly one variant is ever active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueState<T> {
    /// Not yet resolved; the concrete value is supplied later
    Unknown,
    /// Explicitly absent
    Null,
    /// Concrete payload
    Known(T),
}

impl<T> ValueState<T> {
    pub fn is_known(&self) -> bool {
        matches!(self, ValueState::Known(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ValueState::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, ValueState::Unknown)
    }

    /// The payload, if known
    pub fn as_known(&self) -> Option<&T> {
        match self {
            ValueState::Known(value) => Some(value),
            _ => None,
        }
    }
}

/// Dynamic view over every value wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Bool(BoolValue),
    String(StringValue),
    Number(NumberValue),
    Int64(Int64Value),
    Float64(Float64Value),
    List(ListValue),
    Set(SetValue),
    Map(MapValue),
    Object(ObjectValue),
}

impl Value {
    /// The schema-level type of this value
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            Value::Bool(_) => AttributeType::Bool,
            Value::String(_) => AttributeType::String,
            Value::Number(_) => AttributeType::Number,
            Value::Int64(_) => AttributeType::Int64,
            Value::Float64(_) => AttributeType::Float64,
            Value::List(list) => AttributeType::List(Box::new(list.element_type().clone())),
            Value::Set(set) => AttributeType::Set(Box::new(set.element_type().clone())),
            Value::Map(map) => AttributeType::Map(Box::new(map.element_type().clone())),
            Value::Object(object) => AttributeType::Object(object.attribute_types().clone()),
        }
    }

    pub fn is_known(&self) -> bool {
        match self {
            Value::Bool(v) => v.is_known(),
            Value::String(v) => v.is_known(),
            Value::Number(v) => v.is_known(),
            Value::Int64(v) => v.is_known(),
            Value::Float64(v) => v.is_known(),
            Value::List(v) => v.is_known(),
            Value::Set(v) => v.is_known(),
            Value::Map(v) => v.is_known(),
            Value::Object(v) => v.is_known(),
        }
    }

    pub fn is_null(&self) -> bool {
        match self {
            Value::Bool(v) => v.is_null(),
            Value::String(v) => v.is_null(),
            Value::Number(v) => v.is_null(),
            Value::Int64(v) => v.is_null(),
            Value::Float64(v) => v.is_null(),
            Value::List(v) => v.is_null(),
            Value::Set(v) => v.is_null(),
            Value::Map(v) => v.is_null(),
            Value::Object(v) => v.is_null(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        match self {
            Value::Bool(v) => v.is_unknown(),
            Value::String(v) => v.is_unknown(),
            Value::Number(v) => v.is_unknown(),
            Value::Int64(v) => v.is_unknown(),
            Value::Float64(v) => v.is_unknown(),
            Value::List(v) => v.is_unknown(),
            Value::Set(v) => v.is_unknown(),
            Value::Map(v) => v.is_unknown(),
            Value::Object(v) => v.is_unknown(),
        }
    }
}

impl From<BoolValue> for Value {
    fn from(value: BoolValue) -> Self {
        Value::Bool(value)
    }
}

impl From<StringValue> for Value {
    fn from(value: StringValue) -> Self {
        Value::String(value)
    }
}

impl From<NumberValue> for Value {
    fn from(value: NumberValue) -> Self {
        Value::Number(value)
    }
}

impl From<Int64Value> for Value {
    fn from(value: Int64Value) -> Self {
        Value::Int64(value)
    }
}

impl From<Float64Value> for Value {
    fn from(value: Float64Value) -> Self {
        Value::Float64(value)
    }
}

impl From<ListValue> for Value {
    fn from(value: ListValue) -> Self {
        Value::List(value)
    }
}

impl From<SetValue> for Value {
    fn from(value: SetValue) -> Self {
        Value::Set(value)
    }
}

impl From<MapValue> for Value {
    fn from(value: MapValue) -> Self {
        Value::Map(value)
    }
}

impl From<ObjectValue> for Value {
    fn from(value: ObjectValue) -> Self {
        Value::Object(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            return write!(f, "<unknown>");
        }
        if self.is_null() {
            return write!(f, "null");
        }
        match self {
            Value::Bool(v) => write!(f, "{}", v.value().unwrap_or_default()),
            Value::String(v) => write!(f, "{:?}", v.value().unwrap_or_default()),
            Value::Number(v) => write!(f, "{}", v.value().unwrap_or_default()),
            Value::Int64(v) => write!(f, "{}", v.value().unwrap_or_default()),
            Value::Float64(v) => write!(f, "{}", v.value().unwrap_or_default()),
            Value::List(list) => {
                write!(f, "[")?;
                for (i, element) in list.elements().unwrap_or_default().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, "]")
            }
            Value::Set(set) => {
                write!(f, "[")?;
                for (i, element) in set.elements().unwrap_or_default().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                if let Some(entries) = map.entries() {
                    for (i, (key, value)) in entries.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{:?} = {}", key, value)?;
                    }
                }
                write!(f, "}}")
            }
            Value::Object(object) => {
                write!(f, "{{")?;
                if let Some(attributes) = object.attributes() {
                    for (i, (name, value)) in attributes.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{} = {}", name, value)?;
                    }
                }
                write!(f, "}}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_value_state_accessors() {
        let known = ValueState::Known(7);
        assert!(known.is_known());
        assert_eq!(known.as_known(), Some(&7));

        let null: ValueState<i32> = ValueState::Null;
        assert!(null.is_null());
        assert_eq!(null.as_known(), None);
    }

    #[test]
    fn test_display_tri_state() {
        assert_eq!(Value::from(StringValue::unknown()).to_string(), "<unknown>");
        assert_eq!(Value::from(StringValue::null()).to_string(), "null");
        assert_eq!(Value::from(StringValue::known("up")).to_string(), "\"up\"");
        assert_eq!(Value::from(BoolValue::known(true)).to_string(), "true");
        assert_eq!(
            Value::from(NumberValue::known(Decimal::new(995, 1))).to_string(),
            "99.5"
        );
    }

    #[test]
    fn test_display_collections() {
        let list = ListValue::known(
            AttributeType::String,
            vec![
                StringValue::known("db").into(),
                StringValue::known("cache").into(),
            ],
        )
        .unwrap();
        assert_eq!(Value::from(list).to_string(), "[\"db\", \"cache\"]");

        let null_list = ListValue::null(AttributeType::String);
        assert_eq!(Value::from(null_list).to_string(), "null");
    }

    #[test]
    fn test_cross_kind_inequality() {
        // same tri-state, different kind
        assert_ne!(
            Value::from(StringValue::null()),
            Value::from(BoolValue::null())
        );
        // same payload shape, different element type
        assert_ne!(
            Value::from(ListValue::null(AttributeType::String)),
            Value::from(ListValue::null(AttributeType::Bool))
        );
    }

    #[test]
    fn test_attribute_type_reconstruction() {
        let set = SetValue::known(AttributeType::Int64, Vec::new()).unwrap();
        assert_eq!(
            Value::from(set).attribute_type(),
            AttributeType::set_of(AttributeType::Int64)
        );
    }
}
