//! Tolerant version parsing and comparison.

use std::fmt;

/// A parsed `major.minor.patch` version.
///
/// Parsing never fails: missing or non-numeric components become `0`, so
/// `"16.0.0"`, `"0.13"` and `"abc"` all produce a value. Compatibility
/// decisions use only the release pair `(major, minor)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VersionSpec {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl VersionSpec {
    /// Create a version from its components.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a raw version string.
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.trim().split('.').map(parse_component);
        Self {
            major: parts.next().unwrap_or(0),
            minor: parts.next().unwrap_or(0),
            patch: parts.next().unwrap_or(0),
        }
    }

    /// The `(major, minor)` pair used for compatibility decisions.
    pub fn release(&self) -> (u64, u64) {
        (self.major, self.minor)
    }

    /// Whether this version meets `minimum`, ignoring patch level.
    pub fn is_at_least(&self, minimum: &VersionSpec) -> bool {
        self.release() >= minimum.release()
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Leading ASCII digits of a component, e.g. `"15"` for `"15rc1"`.
fn leading_digits(component: &str) -> &str {
    let component = component.trim();
    let end = component
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(component.len());
    &component[..end]
}

// Suffixes after the digits are dropped; a component without leading
// digits is 0 and one too large for u64 saturates.
fn parse_component(component: &str) -> u64 {
    let digits = leading_digits(component);
    if digits.is_empty() {
        0
    } else {
        digits.parse().unwrap_or(u64::MAX)
    }
}

/// Whether the leading component of `raw` starts with a digit.
///
/// Used to reject policy minimums that would silently parse as `0.0`.
pub fn has_numeric_major(raw: &str) -> bool {
    raw.trim()
        .split('.')
        .next()
        .is_some_and(|major| !leading_digits(major).is_empty())
}

/// Extract a version number from a tool's version banner.
///
/// Recognises `1.2.3`, `version 1.2` and `v1.2` forms, in that order.
pub fn extract_version(output: &str) -> Option<String> {
    let patterns = [r"(\d+\.\d+\.\d+)", r"version\s+(\d+\.\d+)", r"v(\d+\.\d+)"];

    for pattern in &patterns {
        if let Ok(re) = regex::Regex::new(pattern) {
            if let Some(caps) = re.captures(output) {
                if let Some(m) = caps.get(1) {
                    return Some(m.as_str().to_string());
                }
            }
        }
    }

    None
}
