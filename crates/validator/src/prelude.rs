//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use fieldguard::prelude::*;
//!
//! let validator = Validator::new(ValidatorConfig::default());
//! ```

pub use crate::config::{SuppressedAlias, ValidatorConfig};
pub use crate::engine::{Report, Validation, Validator, validate, validate_struct};
pub use crate::foundation::{
    FieldError, FieldErrors, FieldRef, Record, Scalar, Shape, StructuralError, Validatable,
    downcast_record,
};
pub use crate::registry::RuleRegistry;

#[cfg(feature = "derive")]
pub use fieldguard_macros::Record;
