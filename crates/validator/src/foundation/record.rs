//! Records: composite values with named, annotated fields
//!
//! A [`Record`] lists its fields as [`FieldRef`]s. Each field carries the
//! raw annotation string (the rule list), an optional external alias used as
//! the report key, and whether it is visible to validation at all.
//!
//! `#[derive(Record)]` generates the implementation from `#[valid(...)]`
//! attributes; hand-written implementations are equally valid.

use std::any::Any;
use std::fmt;

use super::shape::{Shape, Validatable};

// ============================================================================
// RECORD
// ============================================================================

/// A composite value whose fields are validated by the structural walker.
///
/// # Examples
///
/// ```rust,ignore
/// use fieldguard::{FieldRef, Record};
///
/// struct Login {
///     email: String,
/// }
///
/// impl Record for Login {
///     fn type_name(&self) -> &'static str {
///         "Login"
///     }
///
///     fn fields(&self) -> Vec<FieldRef<'_>> {
///         vec![FieldRef::new("email", &self.email).with_tag("required,email")]
///     }
/// }
/// ```
// The explicit `'static` bound makes `&dyn Record` default to
// `dyn Record + 'static`, which is what `downcast_record` needs.
pub trait Record: Any + 'static {
    /// Type name used when rendering the record in messages.
    fn type_name(&self) -> &'static str;

    /// Fields in declaration order.
    fn fields(&self) -> Vec<FieldRef<'_>>;
}

/// Downcasts the owning record handed to a custom rule.
///
/// ```rust,ignore
/// registry.register_custom_rule("matches_password", |value, owner| {
///     let Some(form) = downcast_record::<SignupForm>(owner) else { return false };
///     value.as_scalar().is_some_and(|s| s.render() == form.password)
/// });
/// ```
pub fn downcast_record<T: Record>(record: &dyn Record) -> Option<&T> {
    let any: &dyn Any = record;
    any.downcast_ref::<T>()
}

// ============================================================================
// FIELD REF
// ============================================================================

/// One field of a record as seen by the walker.
#[derive(Clone, Copy)]
pub struct FieldRef<'a> {
    /// Declared field name.
    pub name: &'a str,
    /// Raw annotation, e.g. `"optional,length(2|20)"`. `None` when absent.
    pub tag: Option<&'a str>,
    /// External (serialization) name. `"-"` suppresses the alias.
    pub alias: Option<&'a str>,
    /// Hidden fields still count towards record emptiness but are never
    /// validated.
    pub exported: bool,
    /// The field value.
    pub value: &'a dyn Validatable,
}

impl<'a> FieldRef<'a> {
    /// Creates an exported, unannotated field.
    pub fn new(name: &'a str, value: &'a dyn Validatable) -> Self {
        Self {
            name,
            tag: None,
            alias: None,
            exported: true,
            value,
        }
    }

    /// Sets the annotation string.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_tag(mut self, tag: &'a str) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Sets the external alias.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_alias(mut self, alias: &'a str) -> Self {
        self.alias = Some(alias);
        self
    }

    /// Marks the field as hidden from validation.
    #[must_use = "builder methods must be chained or built"]
    pub fn hidden(mut self) -> Self {
        self.exported = false;
        self
    }

    /// Shape of the field value.
    pub fn shape(&self) -> Shape<'a> {
        self.value.shape()
    }
}

impl fmt::Debug for FieldRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRef")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("alias", &self.alias)
            .field("exported", &self.exported)
            .field("value", &self.value.shape())
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Point {
        x: i32,
        label: String,
    }

    impl Record for Point {
        fn type_name(&self) -> &'static str {
            "Point"
        }

        fn fields(&self) -> Vec<FieldRef<'_>> {
            vec![
                FieldRef::new("x", &self.x).with_tag("required"),
                FieldRef::new("label", &self.label).with_alias("lbl").hidden(),
            ]
        }
    }

    impl Validatable for Point {
        fn shape(&self) -> Shape<'_> {
            Shape::Record(self)
        }
    }

    #[test]
    fn field_builder() {
        let p = Point { x: 1, label: "a".into() };
        let fields = p.fields();
        assert_eq!(fields[0].tag, Some("required"));
        assert!(fields[0].exported);
        assert_eq!(fields[1].alias, Some("lbl"));
        assert!(!fields[1].exported);
    }

    #[test]
    fn record_emptiness_includes_hidden_fields() {
        let zero = Point { x: 0, label: String::new() };
        assert!(zero.shape().is_empty());

        let hidden_set = Point { x: 0, label: "a".into() };
        assert!(!hidden_set.shape().is_empty());
    }

    #[test]
    fn downcast_owning_record() {
        let p = Point { x: 3, label: String::new() };
        let owner: &dyn Record = &p;
        assert_eq!(downcast_record::<Point>(owner).map(|p| p.x), Some(3));
    }

    #[test]
    fn record_renders_type_name() {
        let p = Point { x: 3, label: String::new() };
        assert_eq!(p.shape().render(), "Point{..}");
    }
}
