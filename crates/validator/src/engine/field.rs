//! Field validator
//!
//! Evaluates the content rules of one field against one value. Presence
//! directives are handled by [`super::presence`]; structure by
//! [`super::walker`].

use crate::foundation::{ErrorKind, FieldError, Record, Scalar, Shape};
use crate::registry::RuleRegistry;
use crate::tag::{ParsedTag, RuleInvocation};

use super::presence::is_presence_rule;

// ============================================================================
// FIELD SCOPE
// ============================================================================

/// Per-field state shared by every level of one field's walk.
///
/// Tracks which rule invocations have been applied at least once so the
/// walker can flag the rest as invalid once the field is done.
pub(crate) struct FieldScope<'a> {
    /// Declared field name.
    pub(crate) name: &'a str,
    /// Report key; `None` keeps the field's errors out of the report.
    pub(crate) key: Option<&'a str>,
    pub(crate) tag: &'a ParsedTag,
    /// Record declaring the field, handed to custom-typed rules.
    pub(crate) owner: &'a dyn Record,
    consumed: Vec<bool>,
}

impl<'a> FieldScope<'a> {
    pub(crate) fn new(
        name: &'a str,
        key: Option<&'a str>,
        tag: &'a ParsedTag,
        owner: &'a dyn Record,
    ) -> Self {
        let consumed = tag.rules().iter().map(|r| is_presence_rule(r.name())).collect();
        Self {
            name,
            key,
            tag,
            owner,
            consumed,
        }
    }

    pub(crate) fn consume(&mut self, index: usize) {
        if let Some(slot) = self.consumed.get_mut(index) {
            *slot = true;
        }
    }

    pub(crate) fn consume_all(&mut self) {
        self.consumed.fill(true);
    }

    /// Rule invocations no level of the walk has applied.
    pub(crate) fn unconsumed(&self) -> impl Iterator<Item = &'a RuleInvocation> + '_ {
        self.tag
            .rules()
            .iter()
            .zip(&self.consumed)
            .filter(|(_, consumed)| !**consumed)
            .map(|(rule, _)| rule)
    }

    /// Builds an error attributed to this field.
    pub(crate) fn error(&self, rule: &str, message: impl Into<String>, kind: ErrorKind) -> FieldError {
        FieldError::new(self.name, rule, message, kind).with_field(self.key.unwrap_or(self.name))
    }

    fn content_error(&self, rule: &RuleInvocation, rendered: &str) -> FieldError {
        if let Some(message) = self.tag.message_for(rule) {
            return self
                .error(rule.name(), message, ErrorKind::Content)
                .with_custom_message(true);
        }

        let message = if rule.is_negated() {
            format!("{rendered} does validate as {}", rule.expression())
        } else {
            format!("{rendered} does not validate as {}", rule.expression())
        };
        self.error(rule.name(), message, ErrorKind::Content)
    }
}

// ============================================================================
// CUSTOM RULES
// ============================================================================

/// Applies every custom-typed rule of the field to the field value.
///
/// Returns all failures; the first is the field's representative error.
pub(crate) fn check_custom(registry: &RuleRegistry, shape: &Shape<'_>, scope: &mut FieldScope<'_>) -> Vec<FieldError> {
    let mut failures = Vec::new();
    let tag = scope.tag;

    for (index, rule) in tag.rules().iter().enumerate() {
        let Some(predicate) = registry.custom_rule(rule.name()) else {
            continue;
        };
        scope.consume(index);

        let passed = predicate(shape, scope.owner);
        tracing::trace!(field = scope.name, rule = rule.token(), passed, "custom rule");
        if passed {
            continue;
        }

        let error = match tag.message_for(rule) {
            Some(message) => scope
                .error(rule.name(), message, ErrorKind::Content)
                .with_custom_message(true),
            None => scope.error(
                rule.name(),
                format!("{} does not validate as {}", shape.render(), rule.token()),
                ErrorKind::Content,
            ),
        };
        failures.push(error);
    }

    failures
}

// ============================================================================
// SCALAR RULES
// ============================================================================

/// Applies the zero-parameter and parameterized rules of the field to a
/// scalar.
///
/// Every applicable rule is evaluated; failures come back in rule order.
pub(crate) fn check_scalar(registry: &RuleRegistry, scalar: Scalar<'_>, scope: &mut FieldScope<'_>) -> Vec<FieldError> {
    let mut failures = Vec::new();
    let tag = scope.tag;
    let rendered = scalar.render();

    for (index, rule) in tag.rules().iter().enumerate() {
        if is_presence_rule(rule.name()) || registry.custom_rule(rule.name()).is_some() {
            continue;
        }

        if rule.is_parameterized() {
            let Some(predicate) = registry.param_rule(rule.name()) else {
                continue;
            };
            scope.consume(index);

            if !scalar.accepts_params() {
                failures.push(scope.error(
                    rule.name(),
                    format!("Validator {} doesn't support kind {}", rule.expression(), scalar.kind()),
                    ErrorKind::UnsupportedKind,
                ));
                continue;
            }

            let passed = predicate(&rendered, rule.params());
            tracing::trace!(field = scope.name, rule = rule.token(), passed, "parameterized rule");
            if passed == rule.is_negated() {
                failures.push(scope.content_error(rule, &rendered));
            }
            continue;
        }

        let Some(predicate) = registry.rule(rule.name()) else {
            continue;
        };
        scope.consume(index);

        if !scalar.is_textual() {
            failures.push(scope.error(
                rule.name(),
                format!(
                    "Validator {} doesn't support kind {} for value {rendered}",
                    rule.expression(),
                    scalar.kind()
                ),
                ErrorKind::UnsupportedKind,
            ));
            continue;
        }

        let passed = predicate(&rendered);
        tracing::trace!(field = scope.name, rule = rule.token(), passed, "rule");
        if passed == rule.is_negated() {
            failures.push(scope.content_error(rule, &rendered));
        }
    }

    failures
}

// ============================================================================
// TESTS
// ============================================================================
