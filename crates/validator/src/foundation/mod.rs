//! Core validation types and traits
//!
//! This module contains the building blocks the engine operates on:
//!
//! - **Shapes**: [`Validatable`], [`Shape`], [`Scalar`], [`MapKey`]
//! - **Records**: [`Record`], [`FieldRef`], [`downcast_record`]
//! - **Errors**: [`FieldError`], [`FieldErrors`], [`StructuralError`]
//!
//! # Architecture
//!
//! The engine never inspects Rust types directly. Every value is reduced to
//! a [`Shape`], a closed enum, so traversal is an exhaustive `match` instead
//! of runtime type inspection:
//!
//! ```rust,ignore
//! match value.shape() {
//!     Shape::Scalar(s) => { /* run string predicates on s.render() */ }
//!     Shape::Record(r) => { /* walk r.fields() */ }
//!     Shape::Sequence(items) => { /* every element, no short-circuit */ }
//!     // ...
//! }
//! ```

pub mod error;
pub mod record;
pub mod shape;

pub use error::{ErrorKind, FieldError, FieldErrors, StructuralError};
pub use record::{FieldRef, Record, downcast_record};
pub use shape::{KeyRef, MapKey, Scalar, Shape, Validatable};

