//! JSON bridging for wire values
//!
//! JSON has no unknown marker, so encoding is partial: any unknown node
//! fails with the path to it. Numbers are emitted as JSON numbers only
//! when the decimal survives an exact round-trip through f64; otherwise
//! they fall back to a numeric string, which the decoder accepts again.

use attr_types::AttributePath;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::{ConversionError, JsonError};
use crate::types::{AttributeType, WireType};
use crate::value::{
    BoolValue, Float64Value, Int64Value, ListValue, MapValue, NumberValue, ObjectValue, SetValue,
    StringValue, Value,
};
use crate::wire::{WireContents, WireValue};

/// Render a wire value as JSON. Fails on any unknown node.
pub fn to_json(wire: &WireValue) -> Result<serde_json::Value, JsonError> {
    to_json_at(wire, &AttributePath::root())
}

fn to_json_at(
    wire: &WireValue,
    path: &AttributePath,
) -> Result<serde_json::Value, JsonError> {
    match wire.contents() {
        WireContents::Unknown => Err(JsonError::UnknownNotSerializable { path: path.clone() }),
        WireContents::Null => Ok(serde_json::Value::Null),
        WireContents::Bool(b) => Ok(serde_json::Value::Bool(*b)),
        WireContents::String(s) => Ok(serde_json::Value::String(s.clone())),
        WireContents::Number(n) => Ok(number_to_json(*n)),
        WireContents::Elements(children) => {
            let mut array = Vec::with_capacity(children.len());
            for (index, child) in children.iter().enumerate() {
                let child_path = match wire.ty() {
                    WireType::Set(_) => path.set_element(child.to_string()),
                    _ => path.index(index),
                };
                array.push(to_json_at(child, &child_path)?);
            }
            Ok(serde_json::Value::Array(array))
        }
        WireContents::Pairs(children) => {
            let mut object = serde_json::Map::with_capacity(children.len());
            for (key, child) in children.iter() {
                let child_path = match wire.ty() {
                    WireType::Map(_) => path.key(key.clone()),
                    _ => path.attribute(key.clone()),
                };
                object.insert(key.clone(), to_json_at(child, &child_path)?);
            }
            Ok(serde_json::Value::Object(object))
        }
    }
}

/// Emit a decimal as a JSON number when the f64 round-trip is exact,
/// otherwise as a numeric string.
fn number_to_json(n: Decimal) -> serde_json::Value {
    if n.fract().is_zero() {
        if let Some(i) = n.to_i64() {
            return serde_json::Value::Number(serde_json::Number::from(i));
        }
    }
    if let Some(f) = n.to_f64() {
        if Decimal::from_f64(f) == Some(n) {
            if let Some(number) = serde_json::Number::from_f64(f) {
                return serde_json::Value::Number(number);
            }
        }
    }
    serde_json::Value::String(n.to_string())
}

/// Decode a JSON value against a schema type.
///
/// JSON null becomes a typed null; numbers are accepted from JSON numbers
/// or numeric strings; objects must match the declared attribute set
/// exactly.
pub fn from_json(
    ty: &AttributeType,
    json: &serde_json::Value,
) -> Result<Value, ConversionError> {
    from_json_at(ty, json, &AttributePath::root())
}

fn from_json_at(
    ty: &AttributeType,
    json: &serde_json::Value,
    path: &AttributePath,
) -> Result<Value, ConversionError> {
    if json.is_null() {
        return Ok(ty.null_value());
    }

    let unexpected = || ConversionError::UnexpectedJson {
        path: path.clone(),
        expected: ty.clone(),
        found: json_kind(json),
    };

    match ty {
        AttributeType::Bool => match json {
            serde_json::Value::Bool(b) => Ok(Value::Bool(BoolValue::known(*b))),
            _ => Err(unexpected()),
        },
        AttributeType::String => match json {
            serde_json::Value::String(s) => Ok(Value::String(StringValue::known(s.clone()))),
            _ => Err(unexpected()),
        },
        AttributeType::Number => {
            let n = json_number(json, path).ok_or_else(unexpected)??;
            Ok(Value::Number(NumberValue::known(n)))
        }
        AttributeType::Int64 => {
            let n = json_number(json, path).ok_or_else(unexpected)??;
            if !n.fract().is_zero() {
                return Err(ConversionError::NumberNotAnInteger {
                    path: path.clone(),
                    value: n,
                });
            }
            let integer = n.to_i64().ok_or(ConversionError::NumberOutOfRange {
                path: path.clone(),
                value: n,
                target: "int64",
            })?;
            Ok(Value::Int64(Int64Value::known(integer)))
        }
        AttributeType::Float64 => {
            let n = json_number(json, path).ok_or_else(unexpected)??;
            let float = n.to_f64().ok_or(ConversionError::NumberOutOfRange {
                path: path.clone(),
                value: n,
                target: "float64",
            })?;
            let value =
                Float64Value::known(float).map_err(|_| ConversionError::NumberOutOfRange {
                    path: path.clone(),
                    value: n,
                    target: "float64",
                })?;
            Ok(Value::Float64(value))
        }
        AttributeType::List(element) => match json {
            serde_json::Value::Array(items) => {
                let mut elements = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    elements.push(from_json_at(element, item, &path.index(index))?);
                }
                Ok(Value::List(ListValue::known_unchecked(
                    (**element).clone(),
                    elements,
                )))
            }
            _ => Err(unexpected()),
        },
        AttributeType::Set(element) => match json {
            serde_json::Value::Array(items) => {
                let mut elements = Vec::with_capacity(items.len());
                for item in items.iter() {
                    elements.push(from_json_at(
                        element,
                        item,
                        &path.set_element(item.to_string()),
                    )?);
                }
                Ok(Value::Set(SetValue::known_unchecked(
                    (**element).clone(),
                    elements,
                )))
            }
            _ => Err(unexpected()),
        },
        AttributeType::Map(element) => match json {
            serde_json::Value::Object(entries) => {
                let mut decoded = BTreeMap::new();
                for (key, item) in entries.iter() {
                    let value = from_json_at(element, item, &path.key(key.clone()))?;
                    decoded.insert(key.clone(), value);
                }
                Ok(Value::Map(MapValue::known_unchecked(
                    (**element).clone(),
                    decoded,
                )))
            }
            _ => Err(unexpected()),
        },
        AttributeType::Object(declared) => match json {
            serde_json::Value::Object(entries) => {
                for name in declared.keys() {
                    if !entries.contains_key(name) {
                        return Err(ConversionError::MissingAttribute {
                            path: path.clone(),
                            name: name.clone(),
                        });
                    }
                }
                let mut attributes = BTreeMap::new();
                for (name, item) in entries.iter() {
                    let attr_ty =
                        declared
                            .get(name)
                            .ok_or_else(|| ConversionError::UndeclaredAttribute {
                                path: path.clone(),
                                name: name.clone(),
                            })?;
                    let value = from_json_at(attr_ty, item, &path.attribute(name.clone()))?;
                    attributes.insert(name.clone(), value);
                }
                Ok(Value::Object(ObjectValue::known_unchecked(
                    declared.clone(),
                    attributes,
                )))
            }
            _ => Err(unexpected()),
        },
    }
}

/// Pull a decimal out of a JSON number or numeric string.
///
/// Returns None when the JSON value is neither, so the caller can report
/// the kind it actually saw; returns Some(Err) when it looks numeric but
/// does not parse.
fn json_number(
    json: &serde_json::Value,
    path: &AttributePath,
) -> Option<Result<Decimal, ConversionError>> {
    let literal = match json {
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => s.clone(),
        _ => return None,
    };
    let parsed = Decimal::from_str(&literal)
        .or_else(|_| Decimal::from_scientific(&literal))
        .map_err(|_| ConversionError::NumberParse {
            path: path.clone(),
            literal,
        });
    Some(parsed)
}

fn json_kind(json: &serde_json::Value) -> String {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_tree_to_json() {
        let ty = AttributeType::object_of([
            ("name", AttributeType::String),
            ("replicas", AttributeType::Int64),
            ("tags", AttributeType::set_of(AttributeType::String)),
        ]);
        let value = from_json(
            &ty,
            &json!({"name": "api", "replicas": 3, "tags": ["edge", "prod"]}),
        )
        .unwrap();

        let encoded = to_json(&value.to_wire()).unwrap();
        assert_eq!(
            encoded,
            json!({"name": "api", "replicas": 3, "tags": ["edge", "prod"]})
        );
    }

    #[test]
    fn test_json_null_is_typed_null() {
        let decoded = from_json(&AttributeType::list_of(AttributeType::Bool), &json!(null)).unwrap();
        assert!(decoded.is_null());
        assert_eq!(
            decoded.attribute_type(),
            AttributeType::list_of(AttributeType::Bool)
        );
    }

    #[test]
    fn test_unknown_has_no_json_form() {
        let ty = AttributeType::object_of([("resolved_at", AttributeType::String)]);
        let mut attrs = BTreeMap::new();
        attrs.insert(
            "resolved_at".to_string(),
            Value::String(StringValue::unknown()),
        );
        let value = Value::Object(
            ObjectValue::known(ty.attribute_types().unwrap().clone(), attrs).unwrap(),
        );

        match to_json(&value.to_wire()) {
            Err(JsonError::UnknownNotSerializable { path }) => {
                assert_eq!(path.to_string(), "resolved_at");
            }
            other => panic!("expected UnknownNotSerializable, got {:?}", other),
        }
    }

    #[test]
    fn test_numeric_strings_accepted() {
        let decoded = from_json(&AttributeType::Number, &json!("12.75")).unwrap();
        assert_eq!(
            decoded,
            Value::Number(NumberValue::known(Decimal::new(1275, 2)))
        );

        assert!(matches!(
            from_json(&AttributeType::Number, &json!("not-a-number")),
            Err(ConversionError::NumberParse { .. })
        ));
    }

    #[test]
    fn test_large_integer_survives_as_string() {
        // 2^64 + 1 does not fit i64 and loses precision through f64, so it
        // must fall back to the string form
        let n = Decimal::from_str("18446744073709551617").unwrap();
        let encoded = number_to_json(n);
        assert_eq!(encoded, json!("18446744073709551617"));

        let decoded = from_json(&AttributeType::Number, &encoded).unwrap();
        assert_eq!(decoded, Value::Number(NumberValue::known(n)));
    }

    #[test]
    fn test_object_shape_errors_carry_paths() {
        let ty = AttributeType::object_of([("name", AttributeType::String)]);

        assert!(matches!(
            from_json(&ty, &json!({})),
            Err(ConversionError::MissingAttribute { name, .. }) if name == "name"
        ));
        assert!(matches!(
            from_json(&ty, &json!({"name": "api", "extra": 1})),
            Err(ConversionError::UndeclaredAttribute { name, .. }) if name == "extra"
        ));

        let nested = AttributeType::map_of(ty);
        match from_json(&nested, &json!({"svc": {"name": 42}})) {
            Err(ConversionError::UnexpectedJson { path, .. }) => {
                assert_eq!(path.to_string(), "[\"svc\"].name");
            }
            other => panic!("expected UnexpectedJson, got {:?}", other),
        }
    }

    #[test]
    fn test_fraction_rejected_for_int64() {
        assert!(matches!(
            from_json(&AttributeType::Int64, &json!(1.5)),
            Err(ConversionError::NumberNotAnInteger { .. })
        ));
    }
}
