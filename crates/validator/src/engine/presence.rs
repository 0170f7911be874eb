//! Presence resolution
//!
//! Decides, before any content rule runs, whether a value's emptiness is
//! itself a failure. Directives are evaluated in a fixed order:
//!
//! 1. empty value: `required` fails; otherwise the required-by-default
//!    policy fails unless `optional` is declared; otherwise the field passes
//!    and no further rule runs;
//! 2. non-empty value: `forbidden` fails; otherwise content rules run.
//!
//! Declaring several directives is allowed and resolved by that order, so
//! `required` beats `optional` on an empty value.

use crate::foundation::{ErrorKind, FieldError, Shape};

use super::field::FieldScope;

pub(crate) const REQUIRED: &str = "required";
pub(crate) const OPTIONAL: &str = "optional";
pub(crate) const FORBIDDEN: &str = "forbidden";

pub(crate) const NON_ZERO_REQUIRED: &str = "non zero value required";
pub(crate) const MISSING_REQUIRED: &str = "Missing required field";
pub(crate) const ILLEGAL_ATTRIBUTE: &str = "Illegal attribute";

/// Returns true for `required`, `optional`, and `forbidden`.
pub(crate) fn is_presence_rule(name: &str) -> bool {
    matches!(name, REQUIRED | OPTIONAL | FORBIDDEN)
}

#[derive(Debug)]
pub(crate) enum Presence {
    /// Non-empty and allowed; run content rules.
    Proceed,
    /// Empty and allowed; skip every remaining rule.
    Pass,
    Fail(FieldError),
}

pub(crate) fn resolve(shape: &Shape<'_>, scope: &FieldScope<'_>, required_by_default: bool) -> Presence {
    if shape.is_empty() {
        if let Some(rule) = scope.tag.find(REQUIRED) {
            let error = match scope.tag.message_for(rule) {
                Some(message) => scope.error(REQUIRED, message, ErrorKind::Presence).with_custom_message(true),
                None => scope.error(REQUIRED, NON_ZERO_REQUIRED, ErrorKind::Presence),
            };
            return Presence::Fail(error);
        }
        if required_by_default && !scope.tag.has(OPTIONAL) {
            return Presence::Fail(scope.error(REQUIRED, MISSING_REQUIRED, ErrorKind::Presence));
        }
        return Presence::Pass;
    }

    if let Some(rule) = scope.tag.find(FORBIDDEN) {
        let error = match scope.tag.message_for(rule) {
            Some(message) => scope.error(FORBIDDEN, message, ErrorKind::Presence).with_custom_message(true),
            None => scope.error(FORBIDDEN, ILLEGAL_ATTRIBUTE, ErrorKind::Presence),
        };
        return Presence::Fail(error);
    }

    Presence::Proceed
}
