//! `#[derive(Record)]` attribute handling.

#![cfg(all(feature = "derive", feature = "builtins"))]

use fieldguard::{Record, Shape, Validatable};
use pretty_assertions::assert_eq;
use serde::Serialize;

#[derive(Record, Serialize)]
struct Contact {
    #[valid("required,email")]
    email: String,

    #[serde(rename = "phoneNumber")]
    #[valid("numeric")]
    phone: String,

    #[serde(rename = "ignored")]
    #[valid(rules = "alpha", rename = "display")]
    display_name: String,

    #[serde(skip)]
    internal: u64,

    #[valid(skip)]
    #[serde(skip)]
    cache: std::cell::Cell<u8>,

    notes: Option<String>,

    r#type: String,
}

fn contact() -> Contact {
    Contact {
        email: "a@b.co".into(),
        phone: "123".into(),
        display_name: "Ann".into(),
        internal: 0,
        cache: std::cell::Cell::new(0),
        notes: None,
        r#type: "person".into(),
    }
}

#[test]
fn fields_follow_declaration_order() {
    let c = contact();
    let names: Vec<&str> = c.fields().iter().map(|f| f.name).collect();
    assert_eq!(names, vec!["email", "phone", "display_name", "internal", "notes", "type"]);
}

#[test]
fn attribute_forms() {
    let c = contact();
    let fields = c.fields();

    assert_eq!(fields[0].tag, Some("required,email"));
    assert_eq!(fields[0].alias, None);

    assert_eq!(fields[1].tag, Some("numeric"));
    assert_eq!(fields[1].alias, Some("phoneNumber"));

    // `valid(rename)` wins over serde.
    assert_eq!(fields[2].tag, Some("alpha"));
    assert_eq!(fields[2].alias, Some("display"));

    assert!(!fields[3].exported);
    assert!(fields[4].exported);
    assert_eq!(fields[4].tag, None);
}

#[test]
fn derived_record_is_its_own_shape() {
    let c = contact();
    assert_eq!(c.type_name(), "Contact");
    assert!(matches!(c.shape(), Shape::Record(r) if r.type_name() == "Contact"));
    assert_eq!(c.shape().render(), "Contact{..}");
}

#[test]
fn serde_rename_becomes_report_key() {
    let mut c = contact();
    c.phone = "12-34".into();

    let outcome = fieldguard::Validator::default().validate(&c);
    assert_eq!(
        outcome.report().get("phoneNumber"),
        Some(&["12-34 does not validate as numeric".to_owned()][..])
    );
}

#[derive(Record)]
struct Wrapper<T> {
    #[valid("required")]
    inner: T,
}

#[test]
fn generic_records() {
    let w = Wrapper { inner: 5_u8 };
    assert_eq!(w.fields().len(), 1);
    assert!(fieldguard::Validator::default().validate(&w).is_valid());

    let empty = Wrapper { inner: String::new() };
    assert!(!fieldguard::Validator::default().validate(&empty).is_valid());
}

#[test]
fn record_emptiness_counts_hidden_fields() {
    #[derive(Record, Serialize)]
    struct Pair {
        #[valid("alpha")]
        shown: String,
        #[serde(skip)]
        secret: String,
    }

    let zero = Pair {
        shown: String::new(),
        secret: String::new(),
    };
    assert!(zero.shape().is_empty());

    let hidden_set = Pair {
        shown: String::new(),
        secret: "x".into(),
    };
    assert!(!hidden_set.shape().is_empty());
    assert!(fieldguard::Validator::default().validate(&hidden_set).is_valid());
}

#[test]
fn valid_hidden_works_without_serde() {
    #[derive(Record)]
    struct Token {
        #[valid(rules = "alpha", rename = "tokenName")]
        name: String,
        #[valid(rules = "numeric", hidden)]
        secret: String,
    }

    let token = Token {
        name: "abc".into(),
        secret: "not numeric".into(),
    };
    let fields = token.fields();
    assert_eq!(fields[0].alias, Some("tokenName"));
    assert!(!fields[1].exported);
    assert!(fieldguard::Validator::default().validate(&token).is_valid());

    let blank = Token {
        name: "1".into(),
        secret: String::new(),
    };
    let outcome = fieldguard::Validator::default().validate(&blank);
    assert!(outcome.report().contains("tokenName"));
    assert!(!outcome.report().contains("secret"));
}
