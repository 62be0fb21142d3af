//! Property tests for the semantic laws the value model promises:
//! wire round-trips are lossless and set equality ignores ordering.

use proptest::prelude::*;
use rust_decimal::Decimal;

use attrval::{
    AttributeType, BoolValue, Int64Value, NumberValue, SetValue, StringValue, Value,
};

fn decimal_strategy() -> impl Strategy<Value = Decimal> {
    (any::<i64>(), 0u32..=10).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

proptest! {
    #[test]
    fn bool_round_trips_through_wire(b in any::<bool>()) {
        let value = Value::Bool(BoolValue::known(b));
        let decoded = Value::from_wire(&AttributeType::Bool, &value.to_wire()).unwrap();
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn string_round_trips_through_wire(s in ".*") {
        let value = Value::String(StringValue::known(s));
        let decoded = Value::from_wire(&AttributeType::String, &value.to_wire()).unwrap();
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn int64_round_trips_through_wire(i in any::<i64>()) {
        let value = Value::Int64(Int64Value::known(i));
        let decoded = Value::from_wire(&AttributeType::Int64, &value.to_wire()).unwrap();
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn number_round_trips_through_wire(n in decimal_strategy()) {
        let value = Value::Number(NumberValue::known(n));
        let decoded = Value::from_wire(&AttributeType::Number, &value.to_wire()).unwrap();
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn set_equality_is_order_insensitive(
        elements in proptest::collection::vec("[a-d]{1,2}", 0..6)
    ) {
        let original: Vec<Value> = elements
            .iter()
            .map(|s| Value::String(StringValue::known(s.clone())))
            .collect();
        let mut reversed = original.clone();
        reversed.reverse();

        let left = SetValue::known(AttributeType::String, original).unwrap();
        let right = SetValue::known(AttributeType::String, reversed).unwrap();
        prop_assert_eq!(left, right);
    }

    #[test]
    fn set_wire_round_trip_preserves_semantic_equality(
        elements in proptest::collection::vec("[a-d]{1,2}", 0..6)
    ) {
        let set = SetValue::known(
            AttributeType::String,
            elements
                .iter()
                .map(|s| Value::String(StringValue::known(s.clone())))
                .collect(),
        )
        .unwrap();
        let value = Value::Set(set);
        let ty = AttributeType::set_of(AttributeType::String);
        let decoded = Value::from_wire(&ty, &value.to_wire()).unwrap();
        prop_assert_eq!(decoded, value);
    }
}
