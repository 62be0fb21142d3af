//! Attribute Types - Level 1 Foundation Types
//!
//! This crate contains the pure data structures shared by the whole
//! attribute-value system: attribute paths, severity levels, and the
//! diagnostics collection every validation and conversion pass reports
//! through.
//!
//! ## Architecture Level: LEVEL 1 (Foundation)
//!
//! This is the bottom layer of the dependency hierarchy. The engine crate
//! depends on this crate; this crate depends on nothing else in the
//! workspace.
//!
//! ## Critical Rules
//!
//! 1. **NO BUSINESS LOGIC** - Only data structures and their accessors
//! 2. **NO WORKSPACE DEPENDENCIES** - Cannot depend on the engine crate
//! 3. **SERIALIZABLE** - All types must support serde

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// ATTRIBUTE PATHS
// ============================================================================

/// A single traversal step into a nested attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathStep {
    /// Descend into a named object attribute
    AttributeName(String),
    /// Descend into a list element by index (0-based)
    ElementKeyInt(usize),
    /// Descend into a map element by key
    ElementKeyString(String),
    /// Descend into a set element, identified by its rendered value
    /// (sets have no stable index)
    ElementKeyValue(String),
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::AttributeName(name) => write!(f, ".{}", name),
            PathStep::ElementKeyInt(index) => write!(f, "[{}]", index),
            PathStep::ElementKeyString(key) => write!(f, "[{:?}]", key),
            PathStep::ElementKeyValue(rendered) => write!(f, "[value={}]", rendered),
        }
    }
}

/// Path from the root of a value to a nested element.
///
/// Paths are immutable values: the builder methods clone-and-extend rather
/// than mutate, so a validator can hold the path to a collection and derive
/// per-element paths from it.
///
/// The empty path renders as an empty string and means "the value itself".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttributePath {
    steps: Vec<PathStep>,
}

impl AttributePath {
    /// The empty path, addressing the root value itself
    pub fn root() -> Self {
        Self { steps: Vec::new() }
    }

    /// Extend with an object attribute name step
    pub fn attribute(&self, name: impl Into<String>) -> Self {
        self.with_step(PathStep::AttributeName(name.into()))
    }

    /// Extend with a list index step
    pub fn index(&self, index: usize) -> Self {
        self.with_step(PathStep::ElementKeyInt(index))
    }

    /// Extend with a map key step
    pub fn key(&self, key: impl Into<String>) -> Self {
        self.with_step(PathStep::ElementKeyString(key.into()))
    }

    /// Extend with a set element step, identified by rendered value
    pub fn set_element(&self, rendered: impl Into<String>) -> Self {
        self.with_step(PathStep::ElementKeyValue(rendered.into()))
    }

    fn with_step(&self, step: PathStep) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self { steps }
    }

    /// Whether this is the root path
    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of steps from the root
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Iterate over the steps from the root outwards
    pub fn steps(&self) -> impl Iterator<Item = &PathStep> {
        self.steps.iter()
    }

    /// The final step, if any
    pub fn last_step(&self) -> Option<&PathStep> {
        self.steps.last()
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for step in &self.steps {
            match step {
                // Leading dot is dropped for the first step so paths read
                // as `services[2].name` rather than `.services[2].name`
                PathStep::AttributeName(name) if first => write!(f, "{}", name)?,
                other => write!(f, "{}", other)?,
            }
            first = false;
        }
        Ok(())
    }
}

/// Errors from parsing a rendered attribute path
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathParseError {
    #[error("empty path step at offset {offset}")]
    EmptyStep { offset: usize },

    #[error("unterminated bracket at offset {offset}")]
    UnterminatedBracket { offset: usize },

    #[error("invalid element key '{key}' at offset {offset}")]
    InvalidElementKey { key: String, offset: usize },

    #[error("set element steps (value=...) cannot be parsed, only rendered")]
    SetElementStep,
}

impl FromStr for AttributePath {
    type Err = PathParseError;

    /// Parse the `Display` rendering of a path.
    ///
    /// Attribute names, list indices, and quoted map keys round-trip;
    /// set element steps are display-only and fail to parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut path = AttributePath::root();
        let mut rest = s;
        let mut offset = 0;

        while !rest.is_empty() {
            if let Some(stripped) = rest.strip_prefix('[') {
                let close = stripped
                    .find(']')
                    .ok_or(PathParseError::UnterminatedBracket { offset })?;
                let key = &stripped[..close];
                if key.starts_with("value=") {
                    return Err(PathParseError::SetElementStep);
                }
                if let Some(quoted) = key.strip_prefix('"').and_then(|k| k.strip_suffix('"')) {
                    path = path.key(quoted);
                } else {
                    let index: usize =
                        key.parse().map_err(|_| PathParseError::InvalidElementKey {
                            key: key.to_string(),
                            offset,
                        })?;
                    path = path.index(index);
                }
                offset += close + 2;
                rest = &stripped[close + 1..];
            } else {
                let rest_after_dot = rest.strip_prefix('.').unwrap_or(rest);
                if rest_after_dot.len() < rest.len() {
                    offset += 1;
                }
                let end = rest_after_dot
                    .find(['.', '['])
                    .unwrap_or(rest_after_dot.len());
                let name = &rest_after_dot[..end];
                if name.is_empty() {
                    return Err(PathParseError::EmptyStep { offset });
                }
                path = path.attribute(name);
                offset += end;
                rest = &rest_after_dot[end..];
            }
        }

        Ok(path)
    }
}

// ============================================================================
// SEVERITY LEVELS
// ============================================================================

/// Severity levels for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    /// Informational message
    Info,
    /// Issue worth noting that does not invalidate the value
    Warning,
    /// Issue that makes the value unusable
    Error,
}

impl Severity {
    /// Get human-readable severity name
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    /// Get emoji representation for display
    pub fn emoji(&self) -> &'static str {
        match self {
            Severity::Info => "ℹ️",
            Severity::Warning => "⚠️",
            Severity::Error => "❌",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// DIAGNOSTICS
// ============================================================================

/// A single diagnostic produced by validation or conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity of the issue
    pub severity: Severity,
    /// Short, single-line summary
    pub summary: String,
    /// Longer explanation suitable for display to an operator
    pub detail: String,
    /// Path to the offending element, if the issue is below the root
    pub path: Option<AttributePath>,
}

impl Diagnostic {
    /// Create an error diagnostic
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.into(),
            path: None,
        }
    }

    /// Create a warning diagnostic
    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            summary: summary.into(),
            detail: detail.into(),
            path: None,
        }
    }

    /// Create an informational diagnostic
    pub fn info(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            summary: summary.into(),
            detail: detail.into(),
            path: None,
        }
    }

    /// Attach the path to the offending element
    pub fn with_path(mut self, path: AttributePath) -> Self {
        self.path = Some(path);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) if !path.is_root() => {
                write!(f, "{}: {} (at {}): {}", self.severity, self.summary, path, self.detail)
            }
            _ => write!(f, "{}: {}: {}", self.severity, self.summary, self.detail),
        }
    }
}

/// Ordered collection of diagnostics accumulated across a pass
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    diagnostics: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a diagnostic
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Append every diagnostic from another collection
    pub fn extend(&mut self, other: Diagnostics) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Whether any diagnostic is an error
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Number of error diagnostics
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Number of warning diagnostics
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Iterate over the diagnostics in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Consume the collection, yielding the underlying vector
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        Self {
            diagnostics: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diagnostic) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", diagnostic)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_display() {
        let path = AttributePath::root()
            .attribute("services")
            .index(2)
            .attribute("name");
        assert_eq!(path.to_string(), "services[2].name");

        let keyed = AttributePath::root().attribute("labels").key("env");
        assert_eq!(keyed.to_string(), "labels[\"env\"]");

        assert_eq!(AttributePath::root().to_string(), "");
    }

    #[test]
    fn test_path_builder_does_not_mutate() {
        let base = AttributePath::root().attribute("services");
        let first = base.index(0);
        let second = base.index(1);
        assert_eq!(base.len(), 1);
        assert_eq!(first.to_string(), "services[0]");
        assert_eq!(second.to_string(), "services[1]");
    }

    #[test]
    fn test_path_parse_round_trip() {
        for rendered in ["services[2].name", "labels[\"env\"]", "a.b.c", "items[0][1]"] {
            let path: AttributePath = rendered.parse().unwrap();
            assert_eq!(path.to_string(), rendered);
        }
    }

    #[test]
    fn test_path_parse_errors() {
        assert_eq!(
            "tags[value=\"x\"]".parse::<AttributePath>(),
            Err(PathParseError::SetElementStep)
        );
        assert!(matches!(
            "a[".parse::<AttributePath>(),
            Err(PathParseError::UnterminatedBracket { .. })
        ));
        assert!(matches!(
            "a[xyz]".parse::<AttributePath>(),
            Err(PathParseError::InvalidElementKey { .. })
        ));
        assert!(matches!(
            "a..b".parse::<AttributePath>(),
            Err(PathParseError::EmptyStep { .. })
        ));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        assert_eq!(Severity::Error.as_str(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");
    }

    #[test]
    fn test_diagnostics_counts() {
        let mut diags = Diagnostics::new();
        assert!(diags.is_empty());
        assert!(!diags.has_errors());

        diags.push(Diagnostic::warning("dup", "possible duplicate"));
        diags.push(
            Diagnostic::error("bad type", "expected string")
                .with_path(AttributePath::root().attribute("name")),
        );
        diags.push(Diagnostic::info("note", "for the record"));

        assert_eq!(diags.len(), 3);
        assert!(diags.has_errors());
        assert_eq!(diags.error_count(), 1);
        assert_eq!(diags.warning_count(), 1);
    }

    #[test]
    fn test_diagnostic_display_includes_path() {
        let diag = Diagnostic::error("duplicate set element", "element appears twice")
            .with_path(AttributePath::root().attribute("tags"));
        let rendered = diag.to_string();
        assert!(rendered.contains("error"));
        assert!(rendered.contains("at tags"));
    }

    #[test]
    fn test_serialization() {
        let path = AttributePath::root().attribute("services").index(1);
        let json = serde_json::to_string(&path).unwrap();
        let deserialized: AttributePath = serde_json::from_str(&json).unwrap();
        assert_eq!(path, deserialized);

        let diag = Diagnostic::warning("w", "detail").with_path(path);
        let diag_json = serde_json::to_string(&diag).unwrap();
        let deserialized_diag: Diagnostic = serde_json::from_str(&diag_json).unwrap();
        assert_eq!(diag, deserialized_diag);
    }
}
