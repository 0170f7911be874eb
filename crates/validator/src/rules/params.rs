//! Parameterized rules
//!
//! Each predicate receives the rendered value plus the parameters written
//! between the parentheses, already split on `|`. Numeric parameters that do
//! not parse count as zero.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use regex::Regex;

/// Compiled `matches(...)` patterns. A pattern that fails to compile is
/// cached as `None` and never matches.
static PATTERNS: LazyLock<RwLock<HashMap<String, Option<Arc<Regex>>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

fn int_param(param: &str) -> i64 {
    param.trim().parse().unwrap_or(0)
}

fn float_param(param: &str) -> f64 {
    param.trim().parse().unwrap_or(0.0)
}

fn bounds(params: &[String]) -> Option<(i64, i64)> {
    match params {
        [min, max] => Some((int_param(min), int_param(max))),
        _ => None,
    }
}

fn within(len: usize, (min, max): (i64, i64)) -> bool {
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    len >= min && len <= max
}

// ============================================================================
// LENGTH
// ============================================================================

/// `length(min|max)`: character count within `[min, max]`.
pub fn rune_length(s: &str, params: &[String]) -> bool {
    bounds(params).is_some_and(|b| within(s.chars().count(), b))
}

/// `bytelength(min|max)`: UTF-8 byte count within `[min, max]`.
pub fn byte_length(s: &str, params: &[String]) -> bool {
    bounds(params).is_some_and(|b| within(s.len(), b))
}

pub fn min_string_length(s: &str, params: &[String]) -> bool {
    match params {
        [min] => within(s.chars().count(), (int_param(min), i64::MAX)),
        _ => false,
    }
}

pub fn max_string_length(s: &str, params: &[String]) -> bool {
    match params {
        [max] => within(s.chars().count(), (i64::MIN, int_param(max))),
        _ => false,
    }
}

// ============================================================================
// NUMERIC
// ============================================================================

/// `range(min|max)`: numeric value within the inclusive range. Bounds may be
/// given in either order.
pub fn range(s: &str, params: &[String]) -> bool {
    let [min, max] = params else {
        return false;
    };
    let value = float_param(s);
    let (low, high) = (float_param(min), float_param(max));
    let (low, high) = if low > high { (high, low) } else { (low, high) };
    value >= low && value <= high
}

/// `divisibleby(n)`: the integer part of the value is a multiple of `n`.
/// A zero divisor never matches.
pub fn divisible_by(s: &str, params: &[String]) -> bool {
    let [divisor] = params else {
        return false;
    };
    let divisor = int_param(divisor);
    if divisor == 0 {
        return false;
    }
    let value = float_param(s) as i64;
    value % divisor == 0
}

// ============================================================================
// MEMBERSHIP AND PATTERNS
// ============================================================================

/// `in(a|b|...)`: exact match against one of the parameters.
pub fn is_in(s: &str, params: &[String]) -> bool {
    params.iter().any(|p| p == s)
}

/// `matches(pattern)`: unanchored regex search. `|` inside the pattern is
/// rejoined, so alternation works as written.
pub fn matches(s: &str, params: &[String]) -> bool {
    if params.is_empty() {
        return false;
    }
    let pattern = params.join("|");
    compiled(&pattern).is_some_and(|re| re.is_match(s))
}

fn compiled(pattern: &str) -> Option<Arc<Regex>> {
    if let Some(cached) = PATTERNS.read().get(pattern) {
        return cached.clone();
    }

    let compiled = match Regex::new(pattern) {
        Ok(re) => Some(Arc::new(re)),
        Err(error) => {
            tracing::warn!(pattern, %error, "invalid matches() pattern");
            None
        }
    };
    PATTERNS.write().insert(pattern.to_owned(), compiled.clone());
    compiled
}

// ============================================================================
// TESTS
// ============================================================================
