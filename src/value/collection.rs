//! Homogeneous collection value wrappers
//!
//! Lists, sets, and maps all carry their element type alongside the
//! tri-state, so a null or unknown collection still knows its wire shape.
//! The known constructors check every element against the element type and
//! fail with a path-carrying [`TypeError`] on the first mismatch.
//!
//! Set uniqueness is deliberately NOT enforced at construction; it is an
//! element-level constraint checked by the validation pass, which reports
//! every duplicate rather than failing on the first.

use attr_types::AttributePath;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::TypeError;
use crate::types::AttributeType;
use crate::value::{Value, ValueState};

/// Ordered collection of values of a single element type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListValue {
    element_type: AttributeType,
    state: ValueState<Vec<Value>>,
}

impl ListValue {
    /// Create a known list, checking each element against the element type
    pub fn known(element_type: AttributeType, elements: Vec<Value>) -> Result<Self, TypeError> {
        for (index, element) in elements.iter().enumerate() {
            let found = element.attribute_type();
            if found != element_type {
                return Err(TypeError::ElementTypeMismatch {
                    path: AttributePath::root().index(index),
                    expected: element_type,
                    found,
                });
            }
        }
        Ok(Self {
            element_type,
            state: ValueState::Known(elements),
        })
    }

    pub(crate) fn known_unchecked(element_type: AttributeType, elements: Vec<Value>) -> Self {
        Self {
            element_type,
            state: ValueState::Known(elements),
        }
    }

    pub fn null(element_type: AttributeType) -> Self {
        Self {
            element_type,
            state: ValueState::Null,
        }
    }

    pub fn unknown(element_type: AttributeType) -> Self {
        Self {
            element_type,
            state: ValueState::Unknown,
        }
    }

    pub fn element_type(&self) -> &AttributeType {
        &self.element_type
    }

    /// The elements, if known
    pub fn elements(&self) -> Option<&[Value]> {
        self.state.as_known().map(Vec::as_slice)
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

/// Unordered collection of unique values of a single element type.
///
/// Equality is order-insensitive: two known sets are equal when their
/// elements form the same multiset. Uniqueness itself is checked by the
/// validation pass, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetValue {
    element_type: AttributeType,
    state: ValueState<Vec<Value>>,
}

impl SetValue {
    /// Create a known set, checking each element against the element type
    pub fn known(element_type: AttributeType, elements: Vec<Value>) -> Result<Self, TypeError> {
        for element in elements.iter() {
            let found = element.attribute_type();
            if found != element_type {
                return Err(TypeError::ElementTypeMismatch {
                    path: AttributePath::root().set_element(element.to_string()),
                    expected: element_type,
                    found,
                });
            }
        }
        Ok(Self {
            element_type,
            state: ValueState::Known(elements),
        })
    }

    pub(crate) fn known_unchecked(element_type: AttributeType, elements: Vec<Value>) -> Self {
        Self {
            element_type,
            state: ValueState::Known(elements),
        }
    }

    pub fn null(element_type: AttributeType) -> Self {
        Self {
            element_type,
            state: ValueState::Null,
        }
    }

    pub fn unknown(element_type: AttributeType) -> Self {
        Self {
            element_type,
            state: ValueState::Unknown,
        }
    }

    pub fn element_type(&self) -> &AttributeType {
        &self.element_type
    }

    /// The elements, if known, in insertion order
    pub fn elements(&self) -> Option<&[Value]> {
        self.state.as_known().map(Vec::as_slice)
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

impl PartialEq for SetValue {
    fn eq(&self, other: &Self) -> bool {
        if self.element_type != other.element_type {
            return false;
        }
        match (&self.state, &other.state) {
            (ValueState::Unknown, ValueState::Unknown) => true,
            (ValueState::Null, ValueState::Null) => true,
            (ValueState::Known(left), ValueState::Known(right)) => multiset_eq(left, right),
            _ => false,
        }
    }
}

/// Order-insensitive element comparison. Elements lack Ord and Hash, so
/// this is a quadratic matching; sets of attribute values are small.
fn multiset_eq(left: &[Value], right: &[Value]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    let mut matched = vec![false; right.len()];
    for element in left {
        let position = right
            .iter()
            .enumerate()
            .position(|(i, candidate)| !matched[i] && candidate == element);
        match position {
            Some(i) => matched[i] = true,
            None => return false,
        }
    }
    true
}

/// String-keyed collection of values of a single element type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapValue {
    element_type: AttributeType,
    state: ValueState<BTreeMap<String, Value>>,
}

impl MapValue {
    /// Create a known map, checking each entry against the element type
    pub fn known(
        element_type: AttributeType,
        entries: BTreeMap<String, Value>,
    ) -> Result<Self, TypeError> {
        for (key, element) in entries.iter() {
            let found = element.attribute_type();
            if found != element_type {
                return Err(TypeError::ElementTypeMismatch {
                    path: AttributePath::root().key(key.clone()),
                    expected: element_type,
                    found,
                });
            }
        }
        Ok(Self {
            element_type,
            state: ValueState::Known(entries),
        })
    }

    pub(crate) fn known_unchecked(
        element_type: AttributeType,
        entries: BTreeMap<String, Value>,
    ) -> Self {
        Self {
            element_type,
            state: ValueState::Known(entries),
        }
    }

    pub fn null(element_type: AttributeType) -> Self {
        Self {
            element_type,
            state: ValueState::Null,
        }
    }

    pub fn unknown(element_type: AttributeType) -> Self {
        Self {
            element_type,
            state: ValueState::Unknown,
        }
    }

    pub fn element_type(&self) -> &AttributeType {
        &self.element_type
    }

    /// The entries, if known
    pub fn entries(&self) -> Option<&BTreeMap<String, Value>> {
        self.state.as_known()
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
