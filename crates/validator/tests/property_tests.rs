//! Property-based tests for fieldguard.

#![cfg(feature = "builtins")]

use std::collections::HashSet;

use fieldguard::{FieldRef, Record, Validatable, Validator};
use proptest::prelude::*;

/// A one-field record whose annotation is chosen at runtime.
struct Sample<V: Validatable + 'static> {
    tag: String,
    value: V,
}

impl<V: Validatable + 'static> Record for Sample<V> {
    fn type_name(&self) -> &'static str {
        "Sample"
    }

    fn fields(&self) -> Vec<FieldRef<'_>> {
        vec![FieldRef::new("value", &self.value).with_tag(&self.tag)]
    }
}

fn sample<V: Validatable + 'static>(tag: impl Into<String>, value: V) -> Sample<V> {
    Sample {
        tag: tag.into(),
        value,
    }
}

fn rule() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("alpha"),
        Just("numeric"),
        Just("alphanum"),
        Just("lowercase"),
        Just("uppercase"),
        Just("hexadecimal"),
        Just("length(2|5)"),
        Just("in(ab|cd|12)"),
    ]
}

// ============================================================================
// NEGATION: rule and !rule disagree on every non-empty value
// ============================================================================

proptest! {
    #[test]
    fn negation_flips_the_verdict(s in "[a-zA-Z0-9]{1,12}", rule in rule()) {
        let validator = Validator::default();
        let plain = validator.validate(&sample(rule, s.clone())).is_valid();
        let negated = validator.validate(&sample(format!("!{rule}"), s)).is_valid();
        prop_assert_ne!(plain, negated);
    }
}

// ============================================================================
// IDEMPOTENCY: validate(x) == validate(x)
// ============================================================================

proptest! {
    #[test]
    fn validation_is_idempotent(s in ".{0,16}", rule in rule()) {
        let validator = Validator::default();
        let record = sample(format!("optional,{rule}"), s);
        let first = validator.validate(&record);
        let second = validator.validate(&record);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn sequences_are_idempotent(values in proptest::collection::vec("[a-c0-9]{1,2}", 0..8)) {
        let validator = Validator::default();
        let record = sample("numeric", values);
        prop_assert_eq!(validator.validate(&record), validator.validate(&record));
    }
}

// ============================================================================
// DEDUP: report entries are unique, in first-occurrence order
// ============================================================================

proptest! {
    #[test]
    fn report_is_deduplicated(values in proptest::collection::vec("[a-c0-9]{1,2}", 1..12)) {
        let outcome = Validator::default().validate(&sample("numeric", values));

        let mut expected = Vec::new();
        let mut seen = HashSet::new();
        for error in outcome.errors() {
            let message = error.to_string();
            if seen.insert(message.clone()) {
                expected.push(message);
            }
        }

        let reported = outcome.report().get("value").map(<[String]>::to_vec).unwrap_or_default();
        prop_assert_eq!(reported, expected);
        prop_assert_eq!(outcome.is_valid(), outcome.errors().is_empty());
    }
}
