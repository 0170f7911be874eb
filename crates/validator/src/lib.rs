//! # fieldguard
//!
//! Annotation-driven validation for Rust records.
//!
//! Each field of a record carries a small rule string. The engine parses it,
//! resolves presence (`required`, `optional`, `forbidden`), runs the named
//! rules against the field value, recurses into nested records, optionals,
//! and collections, and gathers every failure into a field-keyed report.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fieldguard::Record;
//!
//! #[derive(Record)]
//! struct User {
//!     #[valid(rules = "optional,length(2|20),in(Mick|Michael)", rename = "name")]
//!     name: String,
//!     #[valid(rules = "email", rename = "email")]
//!     email: String,
//!     #[valid("-")]
//!     age: u32,
//! }
//!
//! let outcome = fieldguard::validate(&User { name: "M".into(), email: "mic".into(), age: 29 });
//! assert!(!outcome.is_valid());
//! assert_eq!(
//!     outcome.report().get("email").unwrap(),
//!     ["mic does not validate as email"],
//! );
//! ```
//!
//! ## Annotation Grammar
//!
//! Rules are comma separated. `!rule` negates, `rule(a|b)` passes
//! parameters, `rule~message` overrides the failure message, and `-` alone
//! disables validation of the field. See [`tag`].
//!
//! ## Extending
//!
//! Register rules on a [`RuleRegistry`] owned by a [`Validator`], or on the
//! process-wide registry through [`register_rule`], [`register_param_rule`],
//! and [`register_custom_rule`]. Custom rules see the typed value and the
//! record that owns it:
//!
//! ```rust,ignore
//! fieldguard::register_custom_rule("matches_password", |value, owner| {
//!     let Some(form) = fieldguard::downcast_record::<Signup>(owner) else { return false };
//!     value.as_scalar().is_some_and(|s| s.render() == form.password)
//! });
//! ```

extern crate self as fieldguard;

pub mod config;
pub mod engine;
pub mod foundation;
pub mod prelude;
pub mod registry;
#[cfg(feature = "builtins")]
pub mod rules;
pub mod tag;

pub use config::{
    SuppressedAlias, ValidatorConfig, fields_required_by_default, set_fields_required_by_default,
};
pub use engine::{Report, Validation, Validator, validate, validate_struct};
pub use foundation::{
    ErrorKind, FieldError, FieldErrors, FieldRef, KeyRef, MapKey, Record, Scalar, Shape,
    StructuralError, Validatable, downcast_record,
};
pub use registry::{
    RuleArity, RuleRegistry, register_custom_rule, register_param_rule, register_rule,
    unregister_rule,
};

/// Derives [`Record`] and [`Validatable`] for a struct with named fields.
///
/// ```rust,ignore
/// #[derive(fieldguard::Record)]
/// struct Address {
///     #[valid("required,length(2|64)")]
///     street: String,
///     #[serde(rename = "zip")]
///     #[valid("numeric")]
///     postal_code: String,
///     #[valid(skip)]
///     internal_id: u64,
/// }
/// ```
#[cfg(feature = "derive")]
pub use fieldguard_macros::Record;
