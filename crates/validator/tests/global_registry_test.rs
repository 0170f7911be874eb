//! Process-wide registry and configuration.
//!
//! Every record here has only annotated, non-empty fields except in
//! `required_by_default_flag`, so toggling the flag cannot affect the
//! other tests running in parallel.

#![cfg(all(feature = "derive", feature = "builtins"))]

use fieldguard::{Record, RuleArity};
use pretty_assertions::assert_eq;

#[derive(Record)]
struct Sku {
    #[valid("sku_code")]
    code: String,
}

#[test]
fn zero_param_rules_can_be_added_and_removed() {
    let sku = Sku { code: "AB-12".into() };
    let outcome = fieldguard::validate(&sku);
    assert_eq!(
        outcome.report().get("code").map(<[String]>::to_vec),
        Some(vec![r#"The following validator is invalid or can't be applied to the field: "sku_code""#.to_owned()])
    );

    fieldguard::register_rule("sku_code", |s| {
        s.split_once('-')
            .is_some_and(|(a, b)| a.chars().all(|c| c.is_ascii_uppercase()) && b.chars().all(|c| c.is_ascii_digit()))
    });
    assert_eq!(fieldguard::registry::global().arity("sku_code"), Some(RuleArity::ZeroParam));
    assert!(fieldguard::validate(&sku).is_valid());
    assert!(!fieldguard::validate(&Sku { code: "ab-12".into() }).is_valid());

    assert!(fieldguard::unregister_rule("sku_code"));
    assert!(!fieldguard::validate(&sku).is_valid());
}

#[derive(Record)]
struct Batch {
    #[valid("multiple_of(4)")]
    size: u32,
}

#[test]
fn parameterized_rules_receive_params() {
    fieldguard::register_param_rule("multiple_of", |s, params| {
        let (Ok(n), Some(Ok(m))) = (s.parse::<u32>(), params.first().map(|p| p.parse::<u32>())) else {
            return false;
        };
        m != 0 && n % m == 0
    });

    assert!(fieldguard::validate(&Batch { size: 8 }).is_valid());
    assert_eq!(
        fieldguard::validate(&Batch { size: 6 }).report().get("size").map(<[String]>::to_vec),
        Some(vec!["6 does not validate as multiple_of(4)".to_owned()])
    );
}

#[derive(Record)]
struct Range {
    #[valid("required")]
    low: u32,
    #[valid("above_low")]
    high: u32,
}

#[test]
fn custom_rules_compare_sibling_fields() {
    fieldguard::register_custom_rule("above_low", |value, owner| {
        let Some(range) = fieldguard::downcast_record::<Range>(owner) else {
            return false;
        };
        matches!(value, fieldguard::Shape::Scalar(fieldguard::Scalar::Uint(high)) if *high > u64::from(range.low))
    });

    assert!(fieldguard::validate_struct(&Range { low: 1, high: 2 }).is_ok());
    let err = fieldguard::validate_struct(&Range { low: 3, high: 2 }).unwrap_err();
    assert_eq!(err.to_string(), "2 does not validate as above_low");
}

#[derive(Record)]
struct Loose {
    #[valid("alpha")]
    name: String,
    #[valid("optional,alpha")]
    alias: String,
}

#[test]
fn required_by_default_flag() {
    let loose = Loose {
        name: String::new(),
        alias: String::new(),
    };
    assert!(fieldguard::validate(&loose).is_valid());

    fieldguard::set_fields_required_by_default(true);
    let outcome = fieldguard::validate(&loose);
    fieldguard::set_fields_required_by_default(false);

    assert!(!outcome.is_valid());
    assert_eq!(
        outcome.report().get("name").map(<[String]>::to_vec),
        Some(vec!["Missing required field".to_owned()])
    );
    assert!(!outcome.report().contains("alias"));
    assert!(!fieldguard::fields_required_by_default());
}

#[derive(Record)]
struct Part {
    #[valid("alpha")]
    label: String,
}

#[derive(Record)]
struct Assembly {
    #[valid("part_label")]
    label: String,
}

#[test]
fn custom_rules_can_validate_while_rules_are_registered() {
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    fieldguard::register_custom_rule("part_label", |value, _| {
        thread::sleep(Duration::from_millis(200));
        fieldguard::validate(&Part {
            label: value.render(),
        })
        .is_valid()
    });

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let outcome = fieldguard::validate(&Assembly {
            label: "gear".into(),
        });
        let _ = tx.send(outcome.is_valid());
    });

    let registrar = thread::spawn(|| {
        thread::sleep(Duration::from_millis(50));
        fieldguard::register_rule("late_rule", |_| true);
    });

    assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok(true));
    registrar.join().unwrap();
    assert!(fieldguard::registry::global().contains("late_rule"));
    assert!(fieldguard::unregister_rule("late_rule"));
}
