//! Validation engine
//!
//! [`Validator`] binds a [`RuleRegistry`] to a [`ValidatorConfig`] and walks
//! records against them. The free functions [`validate`] and
//! [`validate_struct`] use the process-wide registry and the process-wide
//! required-by-default flag.
//!
//! Every call owns its own error collector, so concurrent calls never share
//! state.

mod field;
mod presence;
mod report;
mod walker;

use std::sync::Arc;

use crate::config::ValidatorConfig;
use crate::foundation::{FieldErrors, Record, StructuralError};
use crate::registry::{self, RuleRegistry};

pub use report::Report;

use walker::Walker;

// ============================================================================
// OUTCOME
// ============================================================================

/// Outcome of one validation call.
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    valid: bool,
    report: Report,
    errors: FieldErrors,
    fault: Option<StructuralError>,
}

impl Validation {
    /// Returns true when every field passed and nothing aborted the walk.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Per-field report, deduplicated.
    #[must_use]
    pub fn report(&self) -> &Report {
        &self.report
    }

    #[must_use]
    pub fn into_report(self) -> Report {
        self.report
    }

    /// Every field error in discovery order, duplicates included.
    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// The structural error that aborted the walk, if any.
    #[must_use]
    pub fn fault(&self) -> Option<&StructuralError> {
        self.fault.as_ref()
    }

    /// `Ok` when valid, otherwise every collected field error.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.valid { Ok(()) } else { Err(self.errors) }
    }
}

// ============================================================================
// VALIDATOR
// ============================================================================

/// A registry and configuration pair. Cheap to clone.
///
/// # Examples
///
/// ```rust,ignore
/// use fieldguard::{Record, Validator, ValidatorConfig};
///
/// #[derive(Record)]
/// struct Signup {
///     #[valid("required,email")]
///     email: String,
/// }
///
/// let validator = Validator::new(ValidatorConfig::default());
/// let outcome = validator.validate(&Signup { email: "nope".into() });
/// assert!(!outcome.is_valid());
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    registry: Arc<RuleRegistry>,
    config: ValidatorConfig,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidatorConfig::default())
    }
}

impl Validator {
    /// A validator over the built-in rules.
    pub fn new(config: ValidatorConfig) -> Self {
        Self::with_registry(RuleRegistry::with_builtins(), config)
    }

    pub fn with_registry(registry: impl Into<Arc<RuleRegistry>>, config: ValidatorConfig) -> Self {
        Self {
            registry: registry.into(),
            config,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    #[must_use]
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validates every exported field of `record`.
    pub fn validate(&self, record: &dyn Record) -> Validation {
        run(&self.registry, &self.config, record)
    }

    /// Like [`Validator::validate`], reduced to a `Result`.
    pub fn validate_struct(&self, record: &dyn Record) -> Result<(), FieldErrors> {
        self.validate(record).into_result()
    }
}

/// Validates `record` against a snapshot of the process-wide registry.
///
/// Rules registered while the call runs apply from the next call on.
pub fn validate(record: &dyn Record) -> Validation {
    let config = ValidatorConfig::from_process();
    let registry = registry::global();
    run(&registry, &config, record)
}

/// Like [`validate`], reduced to a `Result`.
pub fn validate_struct(record: &dyn Record) -> Result<(), FieldErrors> {
    validate(record).into_result()
}

fn run(registry: &RuleRegistry, config: &ValidatorConfig, record: &dyn Record) -> Validation {
    let _span = tracing::debug_span!("validate", record = record.type_name()).entered();

    let (result, report, errors) = Walker::new(registry, config).run(record);
    let (valid, fault) = match result {
        Ok(valid) => (valid, None),
        Err(fault) => (false, Some(fault)),
    };

    tracing::debug!(
        valid,
        errors = errors.len(),
        fields = report.len(),
        fault = fault.as_ref().map(tracing::field::display),
        "validation finished"
    );

    Validation {
        valid,
        report,
        errors,
        fault,
    }
}
