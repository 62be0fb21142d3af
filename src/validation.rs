//! Element-level validation of composite values
//!
//! Type conformance is enforced at construction; this pass checks the
//! constraints that construction deliberately leaves alone so that every
//! violation can be reported at once: set uniqueness and map key rules.
//! Diagnostics carry the full path from the root value to the offending
//! element.

use attr_types::{AttributePath, Diagnostic, Diagnostics};
use tracing::{debug, trace};

use crate::value::Value;

/// Walk a value and collect element-level diagnostics.
///
/// Null and unknown composites contribute nothing; there is nothing to
/// walk until they resolve.
pub fn validate(value: &Value) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    validate_at(value, &AttributePath::root(), &mut diagnostics);
    diagnostics
}

fn validate_at(value: &Value, path: &AttributePath, diagnostics: &mut Diagnostics) {
    trace!(path = %path, "validating value");
    match value {
        Value::Bool(_)
        | Value::String(_)
        | Value::Number(_)
        | Value::Int64(_)
        | Value::Float64(_) => {}

        Value::List(list) => {
            if let Some(elements) = list.elements() {
                for (index, element) in elements.iter().enumerate() {
                    validate_at(element, &path.index(index), diagnostics);
                }
            }
        }

        Value::Set(set) => {
            if let Some(elements) = set.elements() {
                check_set_uniqueness(elements, path, diagnostics);
                for element in elements.iter() {
                    validate_at(element, &path.set_element(element.to_string()), diagnostics);
                }
            }
        }

        Value::Map(map) => {
            if let Some(entries) = map.entries() {
                for (key, element) in entries.iter() {
                    if key.is_empty() {
                        diagnostics.push(
                            Diagnostic::error(
                                "invalid map key",
                                "map keys must be non-empty strings",
                            )
                            .with_path(path.key("")),
                        );
                    }
                    validate_at(element, &path.key(key.clone()), diagnostics);
                }
            }
        }

        Value::Object(object) => {
            if let Some(attributes) = object.attributes() {
                for (name, attribute) in attributes.iter() {
                    validate_at(attribute, &path.attribute(name.clone()), diagnostics);
                }
            }
        }
    }
}

/// Report semantically-equal elements in one set.
///
/// Unknown elements cannot be compared until they resolve: one unknown
/// element is silent, more than one earns a warning since a duplicate is
/// undetectable before resolution.
fn check_set_uniqueness(elements: &[Value], path: &AttributePath, diagnostics: &mut Diagnostics) {
    let mut reported = vec![false; elements.len()];
    for (i, element) in elements.iter().enumerate() {
        if element.is_unknown() || reported[i] {
            continue;
        }
        for (j, candidate) in elements.iter().enumerate().skip(i + 1) {
            if !reported[j] && candidate == element {
                debug!(path = %path, element = %element, "duplicate set element");
                diagnostics.push(
                    Diagnostic::error(
                        "duplicate set element",
                        format!("the element {} appears more than once in the set", element),
                    )
                    .with_path(path.set_element(element.to_string())),
                );
                reported[j] = true;
            }
        }
    }

    let unknown_count = elements.iter().filter(|e| e.is_unknown()).count();
    if unknown_count > 1 {
        diagnostics.push(
            Diagnostic::warning(
                "unresolved set elements",
                format!(
                    "{} elements are still unknown; duplicates cannot be detected until they resolve",
                    unknown_count
                ),
            )
            .with_path(path.clone()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AttributeType;
    use crate::value::{ListValue, MapValue, SetValue, StringValue};
    use attr_types::Severity;
    use std::collections::BTreeMap;

    fn string_set(values: &[&str]) -> Value {
        SetValue::known(
            AttributeType::String,
            values
                .iter()
                .map(|s| Value::String(StringValue::known(*s)))
                .collect(),
        )
        .unwrap()
        .into()
    }

    #[test]
    fn test_unique_set_is_clean() {
        let diagnostics = validate(&string_set(&["a", "b", "c"]));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_duplicate_set_element_reported_once() {
        let diagnostics = validate(&string_set(&["a", "b", "a", "a"]));
        // "a" appears three times: two extra occurrences
        assert_eq!(diagnostics.error_count(), 2);
        let first = diagnostics.iter().next().unwrap();
        assert_eq!(first.severity, Severity::Error);
        assert_eq!(
            first.path.as_ref().unwrap().to_string(),
            "[value=\"a\"]"
        );
    }

    #[test]
    fn test_multiple_unknowns_warn() {
        let set = SetValue::known(
            AttributeType::String,
            vec![
                StringValue::unknown().into(),
                StringValue::unknown().into(),
                StringValue::known("a").into(),
            ],
        )
        .unwrap();
        let diagnostics = validate(&set.into());
        assert_eq!(diagnostics.error_count(), 0);
        assert_eq!(diagnostics.warning_count(), 1);
    }

    #[test]
    fn test_single_unknown_is_silent() {
        let set = SetValue::known(
            AttributeType::String,
            vec![StringValue::unknown().into(), StringValue::known("a").into()],
        )
        .unwrap();
        assert!(validate(&set.into()).is_empty());
    }

    #[test]
    fn test_empty_map_key_rejected() {
        let mut entries = BTreeMap::new();
        entries.insert("".to_string(), Value::String(StringValue::known("x")));
        let map = MapValue::known(AttributeType::String, entries).unwrap();

        let diagnostics = validate(&map.into());
        assert_eq!(diagnostics.error_count(), 1);
    }

    #[test]
    fn test_nested_duplicates_carry_full_path() {
        let inner = string_set(&["dup", "dup"]);
        let list = ListValue::known(
            AttributeType::set_of(AttributeType::String),
            vec![string_set(&["ok"]), inner],
        )
        .unwrap();

        let diagnostics = validate(&list.into());
        assert_eq!(diagnostics.error_count(), 1);
        let diagnostic = diagnostics.iter().next().unwrap();
        assert_eq!(
            diagnostic.path.as_ref().unwrap().to_string(),
            "[1][value=\"dup\"]"
        );
    }

    #[test]
    fn test_null_composites_are_silent() {
        let null_set = SetValue::null(AttributeType::String);
        assert!(validate(&null_set.into()).is_empty());

        let unknown_list = ListValue::unknown(AttributeType::String);
        assert!(validate(&unknown_list.into()).is_empty());
    }
}
