//! Built-in leaf rules
//!
//! Stateless predicates over the canonical string rendering of a value,
//! registered by [`RuleRegistry::with_builtins`](crate::RuleRegistry::with_builtins).
//!
//! # Categories
//!
//! - **Text**: `alpha`, `alphanum`, `numeric`, `int`, `float`, `hexadecimal`,
//!   `hexcolor`, `lowercase`, `uppercase`, `ascii`, `printableascii`,
//!   `multibyte`, `base64`, `uuid*`, `json`, `semver`, `latitude`,
//!   `longitude`, `null`, `notnull`
//! - **Network**: `email`, `url`, `ip`, `ipv4`, `ipv6`, `port`, `dns`,
//!   `host`, `mac`
//! - **Parameterized**: `length`, `stringlength`, `runelength`, `bytelength`,
//!   `range`, `in`, `matches`, `divisibleby`, `minstringlength`,
//!   `maxstringlength`

pub mod network;
pub mod params;
pub mod text;

use crate::registry::RuleRegistry;

/// Zero-parameter built-ins, by name.
pub const RULES: &[(&str, fn(&str) -> bool)] = &[
    ("email", network::is_email),
    ("url", network::is_url),
    ("alpha", text::is_alpha),
    ("alphanum", text::is_alphanumeric),
    ("numeric", text::is_numeric),
    ("int", text::is_int),
    ("float", text::is_float),
    ("hexadecimal", text::is_hexadecimal),
    ("hexcolor", text::is_hexcolor),
    ("lowercase", text::is_lowercase),
    ("uppercase", text::is_uppercase),
    ("ascii", text::is_ascii),
    ("printableascii", text::is_printable_ascii),
    ("multibyte", text::is_multibyte),
    ("base64", text::is_base64),
    ("uuid", text::is_uuid),
    ("uuidv3", text::is_uuid_v3),
    ("uuidv4", text::is_uuid_v4),
    ("uuidv5", text::is_uuid_v5),
    ("json", text::is_json),
    ("ip", network::is_ip),
    ("ipv4", network::is_ipv4),
    ("ipv6", network::is_ipv6),
    ("port", network::is_port),
    ("dns", network::is_dns_name),
    ("host", network::is_host),
    ("mac", network::is_mac),
    ("semver", text::is_semver),
    ("latitude", text::is_latitude),
    ("longitude", text::is_longitude),
    ("null", text::is_null),
    ("notnull", text::is_not_null),
];

/// Parameterized built-ins, by name.
pub const PARAM_RULES: &[(&str, fn(&str, &[String]) -> bool)] = &[
    ("length", params::rune_length),
    ("stringlength", params::rune_length),
    ("runelength", params::rune_length),
    ("bytelength", params::byte_length),
    ("range", params::range),
    ("in", params::is_in),
    ("matches", params::matches),
    ("divisibleby", params::divisible_by),
    ("minstringlength", params::min_string_length),
    ("maxstringlength", params::max_string_length),
];

/// Registers every built-in rule, replacing same-named entries.
pub fn register_builtins(registry: &mut RuleRegistry) {
    for &(name, predicate) in RULES {
        registry.register_rule(name, predicate);
    }
    for &(name, predicate) in PARAM_RULES {
        registry.register_param_rule(name, predicate);
    }
}
