//! Error types for validation failures
//!
//! Two families:
//!
//! - [`FieldError`]: a collected failure attached to one field. These never
//!   abort a validation call; they flow into the report.
//! - [`StructuralError`]: the value cannot be walked at all (unsupported
//!   kind, non-string map keys, runaway nesting). These abort the call.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

// ============================================================================
// ERROR KIND
// ============================================================================

/// Category of a field-level failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// `required`, `forbidden`, or the required-by-default policy.
    Presence,
    /// A rule predicate rejected the value.
    Content,
    /// A rule could not be applied to the value's kind.
    UnsupportedKind,
    /// The rule name resolves to nothing in the registry.
    InvalidRule,
    /// The value could not be walked; mirrors a [`StructuralError`].
    Structural,
}

// ============================================================================
// FIELD ERROR
// ============================================================================

/// A single field-level failure. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// External name the failure is reported under (alias or field name).
    pub field: String,
    /// Declared field name.
    pub name: String,
    /// Human-readable message.
    pub message: String,
    /// Whether `message` came from a `~custom message` annotation.
    pub custom_message: bool,
    /// Rule that failed, without parameters or negation.
    pub rule: String,
    pub kind: ErrorKind,
}

impl FieldError {
    /// Creates an error whose external name equals the declared name.
    pub fn new(
        name: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<String>,
        kind: ErrorKind,
    ) -> Self {
        let name = name.into();
        Self {
            field: name.clone(),
            name,
            message: message.into(),
            custom_message: false,
            rule: rule.into(),
            kind,
        }
    }

    /// Sets the external name.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    /// Flags the message as user supplied.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_custom_message(mut self, custom: bool) -> Self {
        self.custom_message = custom;
        self
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message.trim_matches(' '))
    }
}

impl std::error::Error for FieldError {}

// ============================================================================
// ERROR COLLECTION
// ============================================================================

/// Every field error of one validation call, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[FieldError] {
        &self.errors
    }

    /// One message per external field name: the last one recorded for that
    /// field. Fields keep first-seen order. See [`FieldErrors::first_for`]
    /// for the earliest message instead.
    #[must_use]
    pub fn by_field(&self) -> IndexMap<&str, &str> {
        let mut out = IndexMap::new();
        for error in &self.errors {
            out.insert(error.field.as_str(), error.message.trim_matches(' '));
        }
        out
    }

    /// First message recorded for `field`, if any.
    #[must_use]
    pub fn first_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.trim_matches(' '))
    }

    /// Converts to a `Result`, `Ok` when empty.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl FromIterator<FieldError> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for FieldErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Messages joined with `;`.
impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

// ============================================================================
// STRUCTURAL ERROR
// ============================================================================

/// A value that cannot be walked. Aborts the validation call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum StructuralError {
    #[error("unsupported type {kind} for field '{field}'")]
    UnsupportedKind { field: String, kind: &'static str },

    #[error("unsupported map key type {kind} for field '{field}', keys must be strings")]
    UnsupportedKeyType { field: String, kind: &'static str },

    #[error("maximum nesting depth of {limit} exceeded in {record}")]
    DepthExceeded { record: &'static str, limit: usize },
}

// ============================================================================
// TESTS
// ============================================================================
