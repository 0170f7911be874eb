//! Value shapes
//!
//! Every value the walker can see is reduced to one [`Shape`]: a closed set
//! of categories (scalar, record, indirection, sequence, keyed collection,
//! dynamic wrapper) that the engine matches exhaustively.
//!
//! Smart pointers (`&T`, `Box<T>`, `Rc<T>`, `Arc<T>`) are transparent and
//! report the shape of their pointee. `Option<T>` is the indirection: `None`
//! counts as absent.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use indexmap::IndexMap;

use super::record::Record;

// ============================================================================
// VALIDATABLE
// ============================================================================

/// A value the structural walker can inspect.
///
/// Implemented for scalars, strings, smart pointers, `Option`, the standard
/// collections, `serde_json::Value`, and (through `#[derive(Record)]`) for
/// user records.
pub trait Validatable {
    /// Returns the shape category of this value.
    fn shape(&self) -> Shape<'_>;
}

// ============================================================================
// SCALAR
// ============================================================================

/// A leaf value that predicates can evaluate through its string rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Int128(i128),
    Uint128(u128),
    Float(f64),
    Float32(f32),
    Char(char),
    Str(&'a str),
}

impl Scalar<'_> {
    /// Canonical string rendering handed to rule predicates.
    ///
    /// Integers are base-10, floats use the shortest round-trip `Display`
    /// form (`1.0` renders as `1`), booleans are `true`/`false`.
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            Scalar::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            Scalar::Int(n) => Cow::Owned(n.to_string()),
            Scalar::Uint(n) => Cow::Owned(n.to_string()),
            Scalar::Int128(n) => Cow::Owned(n.to_string()),
            Scalar::Uint128(n) => Cow::Owned(n.to_string()),
            Scalar::Float(n) => Cow::Owned(n.to_string()),
            Scalar::Float32(n) => Cow::Owned(n.to_string()),
            Scalar::Char(c) => Cow::Owned(c.to_string()),
            Scalar::Str(s) => Cow::Borrowed(s),
        }
    }

    /// Kind name used in "unsupported kind" messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Scalar::Bool(_) => "bool",
            Scalar::Int(_) => "int",
            Scalar::Uint(_) => "uint",
            Scalar::Int128(_) => "int128",
            Scalar::Uint128(_) => "uint128",
            Scalar::Float(_) => "float64",
            Scalar::Float32(_) => "float32",
            Scalar::Char(_) => "char",
            Scalar::Str(_) => "string",
        }
    }

    /// Returns true for the zero value of the scalar's type.
    pub fn is_zero(&self) -> bool {
        match self {
            Scalar::Bool(b) => !b,
            Scalar::Int(n) => *n == 0,
            Scalar::Uint(n) => *n == 0,
            Scalar::Int128(n) => *n == 0,
            Scalar::Uint128(n) => *n == 0,
            Scalar::Float(n) => *n == 0.0,
            Scalar::Float32(n) => *n == 0.0,
            Scalar::Char(c) => *c == '\0',
            Scalar::Str(s) => s.is_empty(),
        }
    }

    /// Text-like scalars accept zero-parameter rules.
    pub fn is_textual(&self) -> bool {
        matches!(self, Scalar::Str(_) | Scalar::Char(_))
    }

    /// Scalars that parameterized rules can be applied to.
    pub fn accepts_params(&self) -> bool {
        !matches!(self, Scalar::Bool(_))
    }
}

// ============================================================================
// MAP KEYS
// ============================================================================

/// A borrowed map key as seen by the walker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRef<'a> {
    /// String-like key; keyed collections are iterated in ascending key order.
    Str(&'a str),
    /// Any other key type; the walker rejects the collection.
    Other(&'static str),
}

/// Key types usable in keyed collections.
pub trait MapKey {
    fn key_ref(&self) -> KeyRef<'_>;
}

impl MapKey for str {
    fn key_ref(&self) -> KeyRef<'_> {
        KeyRef::Str(self)
    }
}

impl MapKey for String {
    fn key_ref(&self) -> KeyRef<'_> {
        KeyRef::Str(self)
    }
}

impl MapKey for Cow<'_, str> {
    fn key_ref(&self) -> KeyRef<'_> {
        KeyRef::Str(self)
    }
}

impl<K: MapKey + ?Sized> MapKey for &K {
    fn key_ref(&self) -> KeyRef<'_> {
        (**self).key_ref()
    }
}

impl<K: MapKey + ?Sized> MapKey for Box<K> {
    fn key_ref(&self) -> KeyRef<'_> {
        (**self).key_ref()
    }
}

impl<K: MapKey + ?Sized> MapKey for Arc<K> {
    fn key_ref(&self) -> KeyRef<'_> {
        (**self).key_ref()
    }
}

macro_rules! non_string_keys {
    ($($ty:ty => $kind:literal),* $(,)?) => {
        $(
            impl MapKey for $ty {
                fn key_ref(&self) -> KeyRef<'_> {
                    KeyRef::Other($kind)
                }
            }
        )*
    };
}

non_string_keys! {
    bool => "bool", char => "char",
    i8 => "int", i16 => "int", i32 => "int", i64 => "int", i128 => "int", isize => "int",
    u8 => "uint", u16 => "uint", u32 => "uint", u64 => "uint", u128 => "uint", usize => "uint",
}

// ============================================================================
// SHAPE
// ============================================================================

/// The closed set of value categories the walker dispatches on.
pub enum Shape<'a> {
    /// A leaf value.
    Scalar(Scalar<'a>),
    /// A nested record.
    Record(&'a dyn Record),
    /// An optional value; `None` is absent.
    Indirect(Option<&'a dyn Validatable>),
    /// An ordered collection.
    Sequence(Vec<&'a dyn Validatable>),
    /// A keyed collection, in the collection's own iteration order.
    Keyed(Vec<(KeyRef<'a>, &'a dyn Validatable)>),
    /// A dynamically typed holder; `None` is absent.
    Dynamic(Option<&'a dyn Validatable>),
    /// A value the engine cannot validate. Carries the kind name.
    Unsupported(&'static str),
}

impl Shape<'_> {
    /// Kind name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Scalar(s) => s.kind(),
            Shape::Record(_) => "record",
            Shape::Indirect(_) => "option",
            Shape::Sequence(_) => "sequence",
            Shape::Keyed(_) => "map",
            Shape::Dynamic(_) => "dynamic",
            Shape::Unsupported(kind) => *kind,
        }
    }

    /// Whether the value counts as empty for presence rules.
    ///
    /// A record is empty when every one of its fields is empty, exported or
    /// not. Unsupported values are never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Shape::Scalar(s) => s.is_zero(),
            Shape::Record(r) => r.fields().iter().all(|f| f.value.shape().is_empty()),
            Shape::Indirect(inner) | Shape::Dynamic(inner) => inner.is_none(),
            Shape::Sequence(items) => items.is_empty(),
            Shape::Keyed(entries) => entries.is_empty(),
            Shape::Unsupported(_) => false,
        }
    }

    /// Returns the scalar, if this is one.
    pub fn as_scalar(&self) -> Option<Scalar<'_>> {
        match self {
            Shape::Scalar(s) => Some(*s),
            _ => None,
        }
    }

    /// Human-readable rendering used in default messages.
    pub fn render(&self) -> String {
        match self {
            Shape::Scalar(s) => s.render().into_owned(),
            Shape::Record(r) => format!("{}{{..}}", r.type_name()),
            Shape::Indirect(None) | Shape::Dynamic(None) => "<nil>".to_owned(),
            Shape::Indirect(Some(inner)) | Shape::Dynamic(Some(inner)) => inner.shape().render(),
            Shape::Sequence(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.shape().render()).collect();
                format!("[{}]", parts.join(" "))
            }
            Shape::Keyed(entries) => {
                let mut parts: Vec<(String, String)> = entries
                    .iter()
                    .map(|(k, v)| {
                        let key = match k {
                            KeyRef::Str(s) => (*s).to_owned(),
                            KeyRef::Other(kind) => format!("<{kind}>"),
                        };
                        (key, v.shape().render())
                    })
                    .collect();
                parts.sort_by(|a, b| a.0.cmp(&b.0));
                let body: Vec<String> = parts.into_iter().map(|(k, v)| format!("{k}:{v}")).collect();
                format!("map[{}]", body.join(" "))
            }
            Shape::Unsupported(kind) => format!("<{kind}>"),
        }
    }
}

impl fmt::Debug for Shape<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Scalar(s) => f.debug_tuple("Scalar").field(s).finish(),
            Shape::Record(r) => f.debug_tuple("Record").field(&r.type_name()).finish(),
            Shape::Indirect(inner) => f.debug_tuple("Indirect").field(&inner.is_some()).finish(),
            Shape::Sequence(items) => f.debug_tuple("Sequence").field(&items.len()).finish(),
            Shape::Keyed(entries) => f.debug_tuple("Keyed").field(&entries.len()).finish(),
            Shape::Dynamic(inner) => f.debug_tuple("Dynamic").field(&inner.is_some()).finish(),
            Shape::Unsupported(kind) => f.debug_tuple("Unsupported").field(kind).finish(),
        }
    }
}

// ============================================================================
// SCALAR IMPLEMENTATIONS
// ============================================================================

macro_rules! scalar_impls {
    ($($ty:ty => |$v:ident| $expr:expr),* $(,)?) => {
        $(
            impl Validatable for $ty {
                fn shape(&self) -> Shape<'_> {
                    let $v = *self;
                    Shape::Scalar($expr)
                }
            }
        )*
    };
}

scalar_impls! {
    bool => |v| Scalar::Bool(v),
    char => |v| Scalar::Char(v),
    i8 => |v| Scalar::Int(v.into()),
    i16 => |v| Scalar::Int(v.into()),
    i32 => |v| Scalar::Int(v.into()),
    i64 => |v| Scalar::Int(v),
    isize => |v| Scalar::Int(v as i64),
    u8 => |v| Scalar::Uint(v.into()),
    u16 => |v| Scalar::Uint(v.into()),
    u32 => |v| Scalar::Uint(v.into()),
    u64 => |v| Scalar::Uint(v),
    i128 => |v| Scalar::Int128(v),
    u128 => |v| Scalar::Uint128(v),
    usize => |v| Scalar::Uint(v as u64),
    f32 => |v| Scalar::Float32(v),
    f64 => |v| Scalar::Float(v),
}

impl Validatable for str {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Str(self))
    }
}

impl Validatable for String {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Str(self))
    }
}

impl Validatable for Cow<'_, str> {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Str(self))
    }
}

impl Validatable for () {
    fn shape(&self) -> Shape<'_> {
        Shape::Unsupported("unit")
    }
}

// ============================================================================
// POINTERS AND OPTION
// ============================================================================

impl<T: Validatable + ?Sized> Validatable for &T {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

impl<T: Validatable + ?Sized> Validatable for Box<T> {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

impl<T: Validatable + ?Sized> Validatable for Rc<T> {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

impl<T: Validatable + ?Sized> Validatable for Arc<T> {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

impl<T: Validatable> Validatable for Option<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Indirect(self.as_ref().map(|v| v as &dyn Validatable))
    }
}

// ============================================================================
// COLLECTIONS
// ============================================================================

impl<T: Validatable> Validatable for [T] {
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(self.iter().map(|v| v as &dyn Validatable).collect())
    }
}

impl<T: Validatable, const N: usize> Validatable for [T; N] {
    fn shape(&self) -> Shape<'_> {
        self.as_slice().shape()
    }
}

impl<T: Validatable> Validatable for Vec<T> {
    fn shape(&self) -> Shape<'_> {
        self.as_slice().shape()
    }
}

impl<T: Validatable> Validatable for VecDeque<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(self.iter().map(|v| v as &dyn Validatable).collect())
    }
}

fn keyed<'a, K, V, I>(entries: I) -> Shape<'a>
where
    K: MapKey + 'a,
    V: Validatable + 'a,
    I: Iterator<Item = (&'a K, &'a V)>,
{
    Shape::Keyed(
        entries
            .map(|(k, v)| (k.key_ref(), v as &dyn Validatable))
            .collect(),
    )
}

impl<K: MapKey, V: Validatable, S> Validatable for HashMap<K, V, S> {
    fn shape(&self) -> Shape<'_> {
        keyed(self.iter())
    }
}

impl<K: MapKey, V: Validatable> Validatable for BTreeMap<K, V> {
    fn shape(&self) -> Shape<'_> {
        keyed(self.iter())
    }
}

impl<K: MapKey, V: Validatable, S> Validatable for IndexMap<K, V, S> {
    fn shape(&self) -> Shape<'_> {
        keyed(self.iter())
    }
}

// ============================================================================
// JSON
// ============================================================================

/// `null` is an absent dynamic value; objects are keyed collections.
impl Validatable for serde_json::Value {
    fn shape(&self) -> Shape<'_> {
        use serde_json::Value;

        match self {
            Value::Null => Shape::Dynamic(None),
            Value::Bool(b) => Shape::Scalar(Scalar::Bool(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Shape::Scalar(Scalar::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Shape::Scalar(Scalar::Uint(u))
                } else {
                    Shape::Scalar(Scalar::Float(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            Value::String(s) => Shape::Scalar(Scalar::Str(s)),
            Value::Array(items) => items.as_slice().shape(),
            Value::Object(map) => Shape::Keyed(
                map.iter()
                    .map(|(k, v)| (KeyRef::Str(k), v as &dyn Validatable))
                    .collect(),
            ),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(Scalar::Int(-42), "-42")]
    #[case(Scalar::Uint(7), "7")]
    #[case(Scalar::Int128(i128::MIN), "-170141183460469231731687303715884105728")]
    #[case(Scalar::Uint128(u128::MAX), "340282366920938463463374607431768211455")]
    #[case(Scalar::Float(1.0), "1")]
    #[case(Scalar::Float(2.5), "2.5")]
    #[case(Scalar::Float32(0.25), "0.25")]
    #[case(Scalar::Bool(true), "true")]
    #[case(Scalar::Char('x'), "x")]
    #[case(Scalar::Str("hello"), "hello")]
    fn scalar_rendering(#[case] scalar: Scalar<'static>, #[case] expected: &str) {
        assert_eq!(scalar.render(), expected);
    }

    #[test]
    fn emptiness_by_kind() {
        assert!(String::new().shape().is_empty());
        assert!(!"a".shape().is_empty());
        assert!(0_i32.shape().is_empty());
        assert!(!3_u8.shape().is_empty());
        assert!(0_i128.shape().is_empty());
        assert!(!1_u128.shape().is_empty());
        assert!(0.0_f64.shape().is_empty());
        assert!(false.shape().is_empty());
        assert!(Vec::<String>::new().shape().is_empty());
        assert!(None::<String>.shape().is_empty());
        assert!(!Some(String::new()).shape().is_empty());
        assert!(HashMap::<String, i32>::new().shape().is_empty());
        assert!(!().shape().is_empty());
    }

    #[test]
    fn pointers_are_transparent() {
        let boxed: Box<String> = Box::new("x".into());
        assert!(matches!(boxed.shape(), Shape::Scalar(Scalar::Str("x"))));

        let shared = Arc::new(5_u32);
        assert!(matches!(shared.shape(), Shape::Scalar(Scalar::Uint(5))));
    }

    #[test]
    fn sequence_and_map_rendering() {
        assert_eq!(vec![1, 2, 3].shape().render(), "[1 2 3]");

        let mut map = HashMap::new();
        map.insert("b".to_owned(), 2);
        map.insert("a".to_owned(), 1);
        assert_eq!(map.shape().render(), "map[a:1 b:2]");
    }

    #[test]
    fn integer_keys_are_reported_as_other() {
        let mut map = BTreeMap::new();
        map.insert(1_u32, "x".to_owned());
        match map.shape() {
            Shape::Keyed(entries) => assert_eq!(entries[0].0, KeyRef::Other("uint")),
            other => panic!("unexpected shape {other:?}"),
        }
    }

    #[test]
    fn json_values_map_onto_shapes() {
        assert!(matches!(json!(null).shape(), Shape::Dynamic(None)));
        assert!(matches!(json!(3).shape(), Shape::Scalar(Scalar::Int(3))));
        assert!(matches!(json!(1.5).shape(), Shape::Scalar(Scalar::Float(_))));
        assert!(matches!(json!([1, 2]).shape(), Shape::Sequence(ref v) if v.len() == 2));
        assert!(matches!(json!({"a": 1}).shape(), Shape::Keyed(ref v) if v.len() == 1));
    }
}
