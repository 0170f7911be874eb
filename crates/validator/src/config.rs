//! Validator configuration

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

/// Default recursion limit for nested records and containers.
pub const DEFAULT_MAX_DEPTH: usize = 64;

static FIELDS_REQUIRED_BY_DEFAULT: AtomicBool = AtomicBool::new(false);

/// Makes every field without an annotation fail validation, and every
/// annotated empty field fail unless it is marked `optional`.
///
/// Affects [`crate::validate`] and [`ValidatorConfig::from_process`]. Meant
/// to be set once at startup.
pub fn set_fields_required_by_default(enabled: bool) {
    tracing::debug!(enabled, "fields required by default");
    FIELDS_REQUIRED_BY_DEFAULT.store(enabled, Ordering::Relaxed);
}

/// Current process-wide required-by-default flag.
pub fn fields_required_by_default() -> bool {
    FIELDS_REQUIRED_BY_DEFAULT.load(Ordering::Relaxed)
}

/// What happens to errors of a field whose alias is `-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuppressedAlias {
    /// Report under the declared field name.
    #[default]
    FieldName,
    /// Keep the failure in the outcome but leave it out of the report.
    Drop,
}

/// Settings for one [`Validator`](crate::Validator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    pub fields_required_by_default: bool,
    /// Nesting beyond this many records aborts the call.
    pub max_depth: usize,
    pub suppressed_alias: SuppressedAlias,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            fields_required_by_default: false,
            max_depth: DEFAULT_MAX_DEPTH,
            suppressed_alias: SuppressedAlias::default(),
        }
    }
}

impl ValidatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with the process-wide required-by-default flag applied.
    pub fn from_process() -> Self {
        Self::default().with_fields_required_by_default(fields_required_by_default())
    }

    /// Parses a JSON configuration; missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_fields_required_by_default(mut self, enabled: bool) -> Self {
        self.fields_required_by_default = enabled;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_suppressed_alias(mut self, policy: SuppressedAlias) -> Self {
        self.suppressed_alias = policy;
        self
    }
}
