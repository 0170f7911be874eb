//! Basic usage example for fieldguard

use fieldguard::prelude::*;

#[derive(Record)]
struct Signup {
    #[valid(rules = "required,length(2|20)", rename = "name")]
    name: String,
    #[valid("required,email")]
    email: String,
    #[valid("optional,url")]
    homepage: String,
    #[valid("-")]
    attempts: u32,
}

fn main() {
    let validator = Validator::default();

    let good = Signup {
        name: "Michael".into(),
        email: "michael@example.com".into(),
        homepage: String::new(),
        attempts: 1,
    };
    match validator.validate_struct(&good) {
        Ok(()) => println!("✓ signup is valid"),
        Err(e) => println!("✗ Error: {e}"),
    }

    let bad = Signup {
        name: "M".into(),
        email: "mic".into(),
        homepage: "not a url".into(),
        attempts: 4,
    };
    let outcome = validator.validate(&bad);
    println!("✗ signup is invalid:\n{:#}", outcome.report().to_json());
}
