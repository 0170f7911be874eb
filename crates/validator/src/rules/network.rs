//! Address and network rules.

use std::net::IpAddr;
use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .unwrap()
});

static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?:https?|ftp)://)?(?:\S+(?::\S*)?@)?(?:localhost|(?:\d{1,3}\.){3}\d{1,3}|\[[0-9a-fA-F:.]+\]|(?:[a-zA-Z0-9\x{00a1}-\x{ffff}][a-zA-Z0-9\x{00a1}-\x{ffff}_-]{0,62}\.)+[a-zA-Z\x{00a1}-\x{ffff}]{2,})(?::\d{1,5})?(?:[/?#]\S*)?$",
    )
    .unwrap()
});

static DNS_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9_][a-zA-Z0-9_-]{0,62}(?:\.[a-zA-Z0-9_][a-zA-Z0-9_-]{0,62})*[._]?$").unwrap()
});

const MAX_URL_CHARS: usize = 2083;
const MIN_URL_BYTES: usize = 3;

pub fn is_email(s: &str) -> bool {
    EMAIL.is_match(s)
}

/// Absolute or scheme-less URL with a host.
pub fn is_url(s: &str) -> bool {
    if s.len() <= MIN_URL_BYTES || s.starts_with('.') || s.chars().count() >= MAX_URL_CHARS {
        return false;
    }
    URL.is_match(s)
}

pub fn is_ip(s: &str) -> bool {
    s.parse::<IpAddr>().is_ok()
}

pub fn is_ipv4(s: &str) -> bool {
    is_ip(s) && s.contains('.')
}

/// IPv6, including IPv4-mapped forms.
pub fn is_ipv6(s: &str) -> bool {
    is_ip(s) && s.contains(':')
}

/// Decimal port in `1..=65535`.
pub fn is_port(s: &str) -> bool {
    s.parse::<u16>().is_ok_and(|port| port > 0)
}

/// A DNS name that is not an IP literal.
pub fn is_dns_name(s: &str) -> bool {
    if s.is_empty() || s.bytes().filter(|b| *b != b'.').count() > 255 {
        return false;
    }
    !is_ip(s) && DNS_NAME.is_match(s)
}

pub fn is_host(s: &str) -> bool {
    is_ip(s) || is_dns_name(s)
}

/// EUI-48, EUI-64, or 20-octet InfiniBand address, separated by `:`, `-`,
/// or `.` (groups of four digits).
pub fn is_mac(s: &str) -> bool {
    let (separator, group_len) = if s.contains(':') {
        (':', 2)
    } else if s.contains('-') {
        ('-', 2)
    } else if s.contains('.') {
        ('.', 4)
    } else {
        return false;
    };

    let groups: Vec<&str> = s.split(separator).collect();
    let octets = groups.len() * group_len / 2;
    if !matches!(octets, 6 | 8 | 20) {
        return false;
    }

    groups
        .iter()
        .all(|g| g.len() == group_len && g.bytes().all(|b| b.is_ascii_hexdigit()))
}

// ============================================================================
// TESTS
// ============================================================================
