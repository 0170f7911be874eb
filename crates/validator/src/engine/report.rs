//! Error report
//!
//! [`ErrorCollector`] gathers every field error raised during one
//! validation call. Finishing it yields a [`Report`]: external field name to
//! messages, duplicates removed, first occurrence first.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::foundation::{FieldError, FieldErrors};

// ============================================================================
// REPORT
// ============================================================================

/// Finished per-field error report.
///
/// Serializes as `{"errors": {"<field>": ["<message>", ...]}}`. Fields are
/// kept in the order their first error was raised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    errors: IndexMap<String, Vec<String>>,
}

impl Report {
    /// Returns true when no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Messages recorded for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Failed field names in report order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Vec<String>> {
        self.errors.iter()
    }

    #[must_use]
    pub fn as_map(&self) -> &IndexMap<String, Vec<String>> {
        &self.errors
    }

    #[must_use]
    pub fn into_map(self) -> IndexMap<String, Vec<String>> {
        self.errors
    }

    /// The report as a JSON document.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "errors": self.errors })
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = indexmap::map::Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

// ============================================================================
// COLLECTOR
// ============================================================================

/// Accumulates errors for a single validation call.
///
/// Created empty at the start of the call and consumed by
/// [`ErrorCollector::finish`], so state never leaks between calls.
#[derive(Debug, Default)]
pub(crate) struct ErrorCollector {
    errors: FieldErrors,
    by_field: IndexMap<String, Vec<String>>,
}

impl ErrorCollector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records an error. `key` is the report entry it lands under; `None`
    /// keeps it out of the report but still in the error list.
    pub(crate) fn push(&mut self, error: FieldError, key: Option<&str>) {
        if let Some(key) = key {
            self.by_field
                .entry(key.to_owned())
                .or_default()
                .push(error.to_string());
        }
        self.errors.push(error);
    }

    /// Deduplicates every entry and hands out the report and error list.
    pub(crate) fn finish(self) -> (Report, FieldErrors) {
        let mut errors = self.by_field;
        for messages in errors.values_mut() {
            dedup_preserving_order(messages);
        }
        (Report { errors }, self.errors)
    }
}

/// Removes repeated messages, keeping the first occurrence of each.
pub(crate) fn dedup_preserving_order(messages: &mut Vec<String>) {
    let mut seen = HashSet::with_capacity(messages.len());
    messages.retain(|m| seen.insert(m.clone()));
}

// ============================================================================
// TESTS
// ============================================================================
