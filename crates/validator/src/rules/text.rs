//! Character-class, case, encoding, and format rules.

use std::sync::LazyLock;

use regex::Regex;

static ALPHA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z]+$").unwrap());
static ALPHANUMERIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());
static NUMERIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());
static INT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-+]?(?:0|[1-9][0-9]*)$").unwrap());
static FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[-+]?[0-9]+)?(?:\.[0-9]*)?(?:[eE][-+]?[0-9]+)?$").unwrap()
});
static HEXADECIMAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]+$").unwrap());
static HEXCOLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap());
static BASE64: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9+/]{4})*(?:[A-Za-z0-9+/]{2}==|[A-Za-z0-9+/]{3}=|[A-Za-z0-9+/]{4})$").unwrap()
});
static UUID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$").unwrap()
});
static UUID_V3: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-3[0-9a-f]{3}-[0-9a-f]{4}-[0-9a-f]{12}$").unwrap()
});
static UUID_V4: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$").unwrap()
});
static UUID_V5: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-5[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$").unwrap()
});
static SEMVER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^v?(?:0|[1-9]\d*)\.(?:0|[1-9]\d*)\.(?:0|[1-9]\d*)(?:-(?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*)(?:\.(?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*))*)?(?:\+[0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*)?$",
    )
    .unwrap()
});
static LATITUDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?(?:[1-8]?\d(?:\.\d+)?|90(?:\.0+)?)$").unwrap());
static LONGITUDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?(?:180(?:\.0+)?|(?:1[0-7]\d|[1-9]?\d)(?:\.\d+)?)$").unwrap()
});

// ============================================================================
// CHARACTER CLASSES
// ============================================================================

/// ASCII letters only. Empty is valid.
pub fn is_alpha(s: &str) -> bool {
    s.is_empty() || ALPHA.is_match(s)
}

/// ASCII letters and digits only. Empty is valid.
pub fn is_alphanumeric(s: &str) -> bool {
    s.is_empty() || ALPHANUMERIC.is_match(s)
}

/// ASCII digits only. Empty is valid.
pub fn is_numeric(s: &str) -> bool {
    s.is_empty() || NUMERIC.is_match(s)
}

/// Optionally signed integer without leading zeros. Empty is valid.
pub fn is_int(s: &str) -> bool {
    s.is_empty() || INT.is_match(s)
}

pub fn is_float(s: &str) -> bool {
    !s.is_empty() && FLOAT.is_match(s)
}

pub fn is_hexadecimal(s: &str) -> bool {
    HEXADECIMAL.is_match(s)
}

/// `#abc` or `#aabbcc`, `#` optional.
pub fn is_hexcolor(s: &str) -> bool {
    HEXCOLOR.is_match(s)
}

pub fn is_ascii(s: &str) -> bool {
    s.is_ascii()
}

pub fn is_printable_ascii(s: &str) -> bool {
    s.chars().all(|c| matches!(c, ' '..='~'))
}

/// Contains at least one multi-byte character. Empty is valid.
pub fn is_multibyte(s: &str) -> bool {
    s.is_empty() || !s.is_ascii()
}

// ============================================================================
// CASE
// ============================================================================

pub fn is_lowercase(s: &str) -> bool {
    s == s.to_lowercase()
}

pub fn is_uppercase(s: &str) -> bool {
    s == s.to_uppercase()
}

// ============================================================================
// FORMATS
// ============================================================================

/// Padded standard-alphabet base64.
pub fn is_base64(s: &str) -> bool {
    BASE64.is_match(s)
}

/// Lowercase hyphenated UUID of any version.
pub fn is_uuid(s: &str) -> bool {
    UUID.is_match(s)
}

pub fn is_uuid_v3(s: &str) -> bool {
    UUID_V3.is_match(s)
}

pub fn is_uuid_v4(s: &str) -> bool {
    UUID_V4.is_match(s)
}

pub fn is_uuid_v5(s: &str) -> bool {
    UUID_V5.is_match(s)
}

/// Any well-formed JSON document.
pub fn is_json(s: &str) -> bool {
    serde_json::from_str::<serde::de::IgnoredAny>(s).is_ok()
}

/// Semantic version, optional `v` prefix.
pub fn is_semver(s: &str) -> bool {
    SEMVER.is_match(s)
}

pub fn is_latitude(s: &str) -> bool {
    LATITUDE.is_match(s)
}

pub fn is_longitude(s: &str) -> bool {
    LONGITUDE.is_match(s)
}

pub fn is_null(s: &str) -> bool {
    s.is_empty()
}

pub fn is_not_null(s: &str) -> bool {
    !s.is_empty()
}

// ============================================================================
// TESTS
// ============================================================================
