//! Primitive value wrappers
//!
//! Each wrapper pairs the shared tri-state with a typed payload. The
//! constructors are the only way to produce a known value, so exactly one
//! of unknown/null/payload is ever active.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::value::ValueState;

/// Boolean attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoolValue {
    state: ValueState<bool>,
}

impl BoolValue {
    pub fn known(value: bool) -> Self {
        Self {
            state: ValueState::Known(value),
        }
    }

    pub fn null() -> Self {
        Self {
            state: ValueState::Null,
        }
    }

    pub fn unknown() -> Self {
        Self {
            state: ValueState::Unknown,
        }
    }

    pub fn state(&self) -> &ValueState<bool> {
        &self.state
    }

    /// The payload, if known
    pub fn value(&self) -> Option<bool> {
        self.state.as_known().copied()
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

/// String attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringValue {
    state: ValueState<String>,
}

impl StringValue {
    pub fn known(value: impl Into<String>) -> Self {
        Self {
            state: ValueState::Known(value.into()),
        }
    }

    pub fn null() -> Self {
        Self {
            state: ValueState::Null,
        }
    }

    pub fn unknown() -> Self {
        Self {
            state: ValueState::Unknown,
        }
    }

    pub fn state(&self) -> &ValueState<String> {
        &self.state
    }

    /// The payload, if known
    pub fn value(&self) -> Option<&str> {
        self.state.as_known().map(String::as_str)
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

/// Arbitrary-precision decimal attribute value.
///
/// The payload is a 96-bit fixed-point decimal, which covers the numeric
/// range attribute payloads actually use; the 64-bit refinements below
/// exist for callers that need exact integer or IEEE semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberValue {
    state: ValueState<Decimal>,
}

impl NumberValue {
    pub fn known(value: Decimal) -> Self {
        Self {
            state: ValueState::Known(value),
        }
    }

    pub fn null() -> Self {
        Self {
            state: ValueState::Null,
        }
    }

    pub fn unknown() -> Self {
        Self {
            state: ValueState::Unknown,
        }
    }

    pub fn state(&self) -> &ValueState<Decimal> {
        &self.state
    }

    /// The payload, if known
    pub fn value(&self) -> Option<Decimal> {
        self.state.as_known().copied()
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

/// 64-bit integer attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Int64Value {
    state: ValueState<i64>,
}

impl Int64Value {
    pub fn known(value: i64) -> Self {
        Self {
            state: ValueState::Known(value),
        }
    }

    pub fn null() -> Self {
        Self {
            state: ValueState::Null,
        }
    }

    pub fn unknown() -> Self {
        Self {
            state: ValueState::Unknown,
        }
    }

    pub fn state(&self) -> &ValueState<i64> {
        &self.state
    }

    /// The payload, if known
    pub fn value(&self) -> Option<i64> {
        self.state.as_known().copied()
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

/// 64-bit float attribute value.
///
/// Construction rejects payloads that are not finite or that fall outside
/// the decimal wire range, so equality stays reflexive and wire encoding
/// stays total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Float64Value {
    state: ValueState<f64>,
}

impl Float64Value {
    pub fn known(value: f64) -> Result<Self, TypeError> {
        if !value.is_finite() || Decimal::from_f64(value).is_none() {
            return Err(TypeError::NonRepresentableFloat { value });
        }
        Ok(Self {
            state: ValueState::Known(value),
        })
    }

    pub fn null() -> Self {
        Self {
            state: ValueState::Null,
        }
    }

    pub fn unknown() -> Self {
        Self {
            state: ValueState::Unknown,
        }
    }

    pub fn state(&self) -> &ValueState<f64> {
        &self.state
    }

    /// The payload, if known
    pub fn value(&self) -> Option<f64> {
        self.state.as_known().copied()
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

    #[test]
    fn test_tri_state_exclusivity() {
        let known = BoolValue::known(true);
        assert!(known.is_known());
        assert!(!known.is_null());
        assert!(!known.is_unknown());
        assert_eq!(known.value(), Some(true));

        let null = BoolValue::null();
        assert!(null.is_null());
        assert_eq!(null.value(), None);

        let unknown = BoolValue::unknown();
        assert!(unknown.is_unknown());
        assert_eq!(unknown.value(), None);
    }

    #[test]
    fn test_tri_state_equality() {
        // states must match before payloads are compared
        assert_ne!(StringValue::null(), StringValue::unknown());
        assert_ne!(StringValue::null(), StringValue::known(""));
        assert_ne!(StringValue::unknown(), StringValue::known(""));
        assert_eq!(StringValue::unknown(), StringValue::unknown());
        assert_eq!(StringValue::known("a"), StringValue::known("a"));
        assert_ne!(StringValue::known("a"), StringValue::known("b"));
    }

    #[test]
    fn test_number_payload() {
        let n = NumberValue::known(Decimal::new(12345, 2));
        assert_eq!(n.value().unwrap().to_string(), "123.45");
    }

    #[test]
    fn test_float_rejects_non_finite() {
        assert!(Float64Value::known(1.5).is_ok());
        assert!(matches!(
            Float64Value::known(f64::NAN),
            Err(TypeError::NonRepresentableFloat { .. })
        ));
        assert!(matches!(
            Float64Value::known(f64::INFINITY),
            Err(TypeError::NonRepresentableFloat { .. })
        ));
        // finite but beyond the decimal wire range
        assert!(Float64Value::known(1e300).is_err());
    }

    #[test]
    fn test_int64_boundaries() {
        assert_eq!(Int64Value::known(i64::MAX).value(), Some(i64::MAX));
        assert_eq!(Int64Value::known(i64::MIN).value(), Some(i64::MIN));
    }
}
