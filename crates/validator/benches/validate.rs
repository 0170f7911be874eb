// Validation throughput benchmarks
// Run with: cargo bench -p fieldguard

use std::collections::BTreeMap;
use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use fieldguard::{Record, Validator, ValidatorConfig};

#[derive(Record)]
struct Address {
    #[valid(rules = "required,length(2|64)", rename = "street")]
    street: String,
    #[valid(rules = "required,numeric", rename = "zip")]
    zip_code: String,
}

#[derive(Record)]
struct Customer {
    #[valid(rules = "optional,length(2|20),in(Mick|Michael)", rename = "name")]
    name: String,
    #[valid("required,email")]
    email: String,
    #[valid("range(18|120)")]
    age: u32,
    #[valid("required")]
    address: Address,
    #[valid("alpha")]
    tags: Vec<String>,
    #[valid("numeric")]
    scores: BTreeMap<String, String>,
}

fn customer(valid: bool) -> Customer {
    let mut scores = BTreeMap::new();
    for i in 0..8 {
        scores.insert(format!("k{i}"), if valid { i.to_string() } else { format!("x{i}") });
    }
    Customer {
        name: if valid { "Mick".into() } else { "M".into() },
        email: if valid { "mick@example.com".into() } else { "mic".into() },
        age: 29,
        address: Address {
            street: "Main Street".into(),
            zip_code: "12345".into(),
        },
        tags: vec!["alpha".into(), "beta".into(), "gamma".into()],
        scores,
    }
}

/// Benchmark a record that passes every rule
fn bench_valid_record(c: &mut Criterion) {
    let validator = Validator::new(ValidatorConfig::default());
    let record = customer(true);

    c.bench_function("validate_valid_record", |b| {
        b.iter(|| black_box(validator.validate(black_box(&record))));
    });
}

/// Benchmark a record that fails on several fields (report building)
fn bench_invalid_record(c: &mut Criterion) {
    let validator = Validator::new(ValidatorConfig::default());
    let record = customer(false);

    c.bench_function("validate_invalid_record", |b| {
        b.iter(|| black_box(validator.validate(black_box(&record))));
    });
}

/// Benchmark the process-wide entry point (registry read lock)
fn bench_global_entry_point(c: &mut Criterion) {
    let record = customer(true);

    c.bench_function("validate_global", |b| {
        b.iter(|| black_box(fieldguard::validate(black_box(&record))));
    });
}

/// Benchmark annotation parsing alone
fn bench_tag_parsing(c: &mut Criterion) {
    c.bench_function("parse_tag", |b| {
        b.iter(|| {
            black_box(fieldguard::tag::ParsedTag::parse(black_box(
                "required~name is required,length(2|20),!in(root|admin),alpha",
            )))
        });
    });
}

criterion_group!(
    benches,
    bench_valid_record,
    bench_invalid_record,
    bench_global_entry_point,
    bench_tag_parsing
);
criterion_main!(benches);
