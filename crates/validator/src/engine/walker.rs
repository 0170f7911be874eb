//! Structural walker
//!
//! Visits every exported field of a record, recursing into nested records,
//! optionals, sequences, and string-keyed maps. Field failures are collected
//! and never stop the walk; structural errors abort it.

use tracing::{trace, warn};

use crate::config::{SuppressedAlias, ValidatorConfig};
use crate::foundation::{
    ErrorKind, FieldError, FieldErrors, FieldRef, KeyRef, Record, Shape, StructuralError, Validatable,
};
use crate::registry::RuleRegistry;
use crate::tag::{Annotation, SKIP_ALL};

use super::field::{self, FieldScope};
use super::presence::{self, Presence, REQUIRED};
use super::report::{ErrorCollector, Report};

pub(crate) const NO_RULES_DECLARED: &str = "All fields are required to at least have one validation defined";

/// Walks one validation call. Owned by that call only.
pub(crate) struct Walker<'a> {
    registry: &'a RuleRegistry,
    config: &'a ValidatorConfig,
    collector: ErrorCollector,
    depth: usize,
    fault_recorded: bool,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(registry: &'a RuleRegistry, config: &'a ValidatorConfig) -> Self {
        Self {
            registry,
            config,
            collector: ErrorCollector::new(),
            depth: 0,
            fault_recorded: false,
        }
    }

    /// Walks `record` and hands back the verdict with everything collected.
    ///
    /// A structural error raised outside any field is reported under the
    /// record's type name.
    pub(crate) fn run(mut self, record: &dyn Record) -> (Result<bool, StructuralError>, Report, FieldErrors) {
        let result = self.walk_record(record);
        let result = self.record_fault(record.type_name(), Some(record.type_name()), result);
        let (report, errors) = self.collector.finish();
        (result, report, errors)
    }

    // ========================================================================
    // RECORDS
    // ========================================================================

    /// Validates every exported field of `record`. Returns the conjunction of
    /// all field verdicts.
    pub(crate) fn walk_record(&mut self, record: &dyn Record) -> Result<bool, StructuralError> {
        if self.depth >= self.config.max_depth {
            return Err(StructuralError::DepthExceeded {
                record: record.type_name(),
                limit: self.config.max_depth,
            });
        }

        self.depth += 1;
        let result = self.walk_fields(record);
        self.depth -= 1;
        result
    }

    fn walk_fields(&mut self, record: &dyn Record) -> Result<bool, StructuralError> {
        let mut valid = true;

        for field in record.fields() {
            if !field.exported {
                trace!(record = record.type_name(), field = field.name, "skipping hidden field");
                continue;
            }

            let annotation = Annotation::parse(field.tag);
            let key = self.report_key(&field);

            // Nested records are validated before the field's own rules.
            let mut nested_valid = true;
            let prewalked = match nested_record(field.value) {
                Some(inner) if !annotation.is_skip() => {
                    let result = self.walk_record(inner);
                    nested_valid = self.record_fault(field.name, key, result)?;
                    true
                }
                _ => false,
            };

            let field_valid = self.validate_field(&field, &annotation, key, record, prewalked)?;
            valid &= nested_valid && field_valid;
        }

        Ok(valid)
    }

    /// External name for a field, or `None` when its errors are dropped from
    /// the report.
    fn report_key<'f>(&self, field: &FieldRef<'f>) -> Option<&'f str> {
        match field.alias {
            Some(SKIP_ALL) => match self.config.suppressed_alias {
                SuppressedAlias::FieldName => Some(field.name),
                SuppressedAlias::Drop => None,
            },
            Some(alias) if !alias.is_empty() => Some(alias),
            _ => Some(field.name),
        }
    }

    fn validate_field(
        &mut self,
        field: &FieldRef<'_>,
        annotation: &Annotation,
        key: Option<&str>,
        owner: &dyn Record,
        prewalked: bool,
    ) -> Result<bool, StructuralError> {
        match annotation {
            Annotation::Skip => Ok(true),
            Annotation::Empty => {
                if !self.config.fields_required_by_default {
                    return Ok(true);
                }
                let error = FieldError::new(field.name, REQUIRED, NO_RULES_DECLARED, ErrorKind::Presence)
                    .with_field(key.unwrap_or(field.name));
                self.collector.push(error, key);
                Ok(false)
            }
            Annotation::Rules(tag) => {
                let mut scope = FieldScope::new(field.name, key, tag, owner);
                let result = self.walk_value(field.value, &mut scope, true, prewalked);
                self.record_fault(field.name, key, result)
            }
        }
    }

    /// Mirrors the first structural error of the call into the report under
    /// the innermost field that raised it.
    fn record_fault(
        &mut self,
        name: &str,
        key: Option<&str>,
        result: Result<bool, StructuralError>,
    ) -> Result<bool, StructuralError> {
        if let Err(fault) = &result
            && !self.fault_recorded
        {
            self.fault_recorded = true;
            let error = FieldError::new(name, "structural", fault.to_string(), ErrorKind::Structural)
                .with_field(key.unwrap_or(name));
            self.collector.push(error, key);
        }
        result
    }

    // ========================================================================
    // VALUES
    // ========================================================================

    /// Validates one value of a field. `root` is true for the field value
    /// itself and false for anything reached through an optional, a dynamic
    /// holder, or a collection.
    fn walk_value(
        &mut self,
        value: &dyn Validatable,
        scope: &mut FieldScope<'_>,
        root: bool,
        prewalked: bool,
    ) -> Result<bool, StructuralError> {
        let shape = value.shape();
        trace!(field = scope.name, kind = shape.kind(), root, "visiting value");

        match presence::resolve(&shape, scope, self.config.fields_required_by_default) {
            Presence::Proceed => {}
            Presence::Pass => {
                scope.consume_all();
                return Ok(true);
            }
            Presence::Fail(error) => {
                scope.consume_all();
                self.collector.push(error, scope.key);
                return Ok(false);
            }
        }

        if root {
            let failures = field::check_custom(self.registry, &shape, scope);
            if !failures.is_empty() {
                for error in failures {
                    self.collector.push(error, scope.key);
                }
                return Ok(false);
            }
        }

        let valid = match shape {
            Shape::Scalar(scalar) => {
                let failures = field::check_scalar(self.registry, scalar, scope);
                let valid = failures.is_empty();
                for error in failures {
                    self.collector.push(error, scope.key);
                }
                valid
            }
            Shape::Record(record) => prewalked || self.walk_record(record)?,
            Shape::Indirect(None) | Shape::Dynamic(None) => true,
            Shape::Indirect(Some(inner)) => self.walk_value(inner, scope, false, prewalked)?,
            Shape::Dynamic(Some(inner)) => self.walk_value(inner, scope, false, false)?,
            Shape::Sequence(items) => {
                let mut valid = true;
                for item in items {
                    valid &= self.walk_element(item, scope)?;
                }
                valid
            }
            Shape::Keyed(entries) => self.walk_keyed(entries, scope)?,
            Shape::Unsupported(kind) => {
                return Err(StructuralError::UnsupportedKind {
                    field: scope.name.to_owned(),
                    kind,
                });
            }
        };

        if root {
            let rules_valid = self.report_unconsumed(scope);
            Ok(valid && rules_valid)
        } else {
            Ok(valid)
        }
    }

    /// Collection elements: records are walked directly, everything else is
    /// validated against the field's rules.
    fn walk_element(&mut self, item: &dyn Validatable, scope: &mut FieldScope<'_>) -> Result<bool, StructuralError> {
        match item.shape() {
            Shape::Record(record) => self.walk_record(record),
            _ => self.walk_value(item, scope, false, false),
        }
    }

    fn walk_keyed(
        &mut self,
        entries: Vec<(KeyRef<'_>, &dyn Validatable)>,
        scope: &mut FieldScope<'_>,
    ) -> Result<bool, StructuralError> {
        let mut sorted = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            match key {
                KeyRef::Str(key) => sorted.push((key, value)),
                KeyRef::Other(kind) => {
                    return Err(StructuralError::UnsupportedKeyType {
                        field: scope.name.to_owned(),
                        kind,
                    });
                }
            }
        }
        sorted.sort_by(|a, b| a.0.cmp(b.0));

        let mut valid = true;
        for (_, value) in sorted {
            valid &= self.walk_element(value, scope)?;
        }
        Ok(valid)
    }

    /// Flags every rule no level of the field's walk could apply.
    fn report_unconsumed(&mut self, scope: &FieldScope<'_>) -> bool {
        let mut valid = true;
        for rule in scope.unconsumed() {
            warn!(field = scope.name, rule = rule.token(), "rule is not registered or cannot be applied");
            let error = scope.error(
                rule.name(),
                format!(
                    "The following validator is invalid or can't be applied to the field: {:?}",
                    rule.token()
                ),
                ErrorKind::InvalidRule,
            );
            self.collector.push(error, scope.key);
            valid = false;
        }
        valid
    }
}

/// The record behind a field value, looking through optionals.
fn nested_record(value: &dyn Validatable) -> Option<&dyn Record> {
    match value.shape() {
        Shape::Record(record) => Some(record),
        Shape::Indirect(Some(inner)) => nested_record(inner),
        _ => None,
    }
}
