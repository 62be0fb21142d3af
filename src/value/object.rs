//! Heterogeneous named-attribute value wrapper

use attr_types::AttributePath;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::TypeError;
use crate::types::AttributeType;
use crate::value::{Value, ValueState};

/// A value with a fixed set of named, individually-typed attributes.
///
/// The known constructor enforces an exact match between the declared
/// attribute set and the supplied values: a declared-but-absent attribute
/// and an undeclared-but-present attribute are both construction errors,
/// so a known object always has exactly its declared shape. Optional
/// attributes are expressed as explicit nulls, not omissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectValue {
    attribute_types: BTreeMap<String, AttributeType>,
    state: ValueState<BTreeMap<String, Value>>,
}

impl ObjectValue {
    /// Create a known object, enforcing the declared attribute shape
    pub fn known(
        attribute_types: BTreeMap<String, AttributeType>,
        attributes: BTreeMap<String, Value>,
    ) -> Result<Self, TypeError> {
        for name in attribute_types.keys() {
            if !attributes.contains_key(name) {
                return Err(TypeError::MissingAttribute { name: name.clone() });
            }
        }
        for (name, value) in attributes.iter() {
            let declared = match attribute_types.get(name) {
                Some(declared) => declared,
                None => {
                    return Err(TypeError::UndeclaredAttribute { name: name.clone() });
                }
            };
            let found = value.attribute_type();
            if &found != declared {
                return Err(TypeError::ElementTypeMismatch {
                    path: AttributePath::root().attribute(name.clone()),
                    expected: declared.clone(),
                    found,
                });
            }
        }
        Ok(Self {
            attribute_types,
            state: ValueState::Known(attributes),
        })
    }

    pub(crate) fn known_unchecked(
        attribute_types: BTreeMap<String, AttributeType>,
        attributes: BTreeMap<String, Value>,
    ) -> Self {
        Self {
            attribute_types,
            state: ValueState::Known(attributes),
        }
    }

    pub fn null(attribute_types: BTreeMap<String, AttributeType>) -> Self {
        Self {
            attribute_types,
            state: ValueState::Null,
        }
    }

    pub fn unknown(attribute_types: BTreeMap<String, AttributeType>) -> Self {
        Self {
            attribute_types,
            state: ValueState::Unknown,
        }
    }

    /// Declared attribute name to type mapping
    pub fn attribute_types(&self) -> &BTreeMap<String, AttributeType> {
        &self.attribute_types
    }

    /// The attribute values, if known
    pub fn attributes(&self) -> Option<&BTreeMap<String, Value>> {
        self.state.as_known()
    }

    /// A single attribute value, if the object is known
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.state.as_known().and_then(|attrs| attrs.get(name))
    }

    pub fn is_known(&self) -> bool {
        self.state.is_known()
    }

    pub fn is_null(&self) -> bool {
        self.state.is_null()
    }

    pub fn is_unknown(&self) -> bool {
        self.state.is_unknown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Int64Value, StringValue};

    fn service_types() -> BTreeMap<String, AttributeType> {
        let mut types = BTreeMap::new();
        types.insert("name".to_string(), AttributeType::String);
        types.insert("port".to_string(), AttributeType::Int64);
        types
    }

    #[test]
    fn test_object_shape_enforced() {
        let mut attrs = BTreeMap::new();
        attrs.insert("name".to_string(), Value::String(StringValue::known("api")));
        attrs.insert("port".to_string(), Value::Int64(Int64Value::known(8080)));

        let object = ObjectValue::known(service_types(), attrs).unwrap();
        assert!(object.is_known());
        assert_eq!(
            object.attribute("name"),
            Some(&Value::String(StringValue::known("api")))
        );
    }

    #[test]
    fn test_missing_attribute_rejected() {
        let mut attrs = BTreeMap::new();
        attrs.insert("name".to_string(), Value::String(StringValue::known("api")));

        assert!(matches!(
            ObjectValue::known(service_types(), attrs),
            Err(TypeError::MissingAttribute { name }) if name == "port"
        ));
    }

    #[test]
    fn test_undeclared_attribute_rejected() {
        let mut attrs = BTreeMap::new();
        attrs.insert("name".to_string(), Value::String(StringValue::known("api")));
        attrs.insert("port".to_string(), Value::Int64(Int64Value::known(8080)));
        attrs.insert("tier".to_string(), Value::String(StringValue::known("gold")));

        assert!(matches!(
            ObjectValue::known(service_types(), attrs),
            Err(TypeError::UndeclaredAttribute { name }) if name == "tier"
        ));
    }

    #[test]
    fn test_attribute_type_mismatch_carries_path() {
        let mut attrs = BTreeMap::new();
        attrs.insert("name".to_string(), Value::String(StringValue::known("api")));
        attrs.insert(
            "port".to_string(),
            Value::String(StringValue::known("8080")),
        );

        match ObjectValue::known(service_types(), attrs) {
            Err(TypeError::ElementTypeMismatch { path, expected, .. }) => {
                assert_eq!(path.to_string(), "port");
                assert_eq!(expected, AttributeType::Int64);
            }
            other => panic!("expected ElementTypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_null_attributes_satisfy_shape() {
        let mut attrs = BTreeMap::new();
        attrs.insert("name".to_string(), Value::String(StringValue::null()));
        attrs.insert("port".to_string(), Value::Int64(Int64Value::null()));

        let object = ObjectValue::known(service_types(), attrs).unwrap();
        assert!(object.is_known());
        assert!(object.attribute("name").unwrap().is_null());
    }
}
