//! # fieldguard-macros
//!
//! Derive macro for `fieldguard`.
//!
//! | Macro | Description |
//! |-------|-------------|
//! | [`Record`](derive@Record) | Implements `Record` and `Validatable` for a struct |
//!
//! Use it through the `fieldguard` crate, which re-exports it under its
//! default `derive` feature.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

extern crate proc_macro;

use proc_macro::TokenStream;

mod record;
mod support;

/// Derive macro for the `Record` trait.
///
/// # Field attributes
///
/// - `#[valid("rules")]` - the field's annotation string
/// - `#[valid(rules = "...")]` - same, in key-value form
/// - `#[valid(rename = "...")]` - external name used in the report
/// - `#[valid(skip)]` - leaves the field out of the record entirely
/// - `#[valid(hidden)]` - keeps the field out of validation while still
///   counting it for record emptiness
///
/// `#[serde(rename = "...")]` also sets the external name when
/// `valid(rename)` is absent, and `#[serde(skip)]` /
/// `#[serde(skip_serializing)]` act like `valid(hidden)`. Only `valid` is a
/// helper attribute of this derive: `#[serde(...)]` compiles only when the
/// struct also derives `Serialize` or `Deserialize`. Without serde, use
/// `valid(rename = ...)` and `valid(hidden)`.
///
/// # Example
///
/// ```ignore
/// #[derive(fieldguard::Record)]
/// struct User {
///     #[valid(rules = "optional,length(2|20)", rename = "name")]
///     name: String,
///
///     #[serde(rename = "email")]
///     #[valid("email")]
///     email: String,
///
///     #[valid("-")]
///     age: u32,
/// }
/// ```
#[proc_macro_derive(Record, attributes(valid))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive(input)
}
