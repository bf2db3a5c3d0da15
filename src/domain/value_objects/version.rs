//! Version value objects
//!
//! - `Version`: a strict `MAJOR.MINOR.PATCH` numeric triple
//! - `BuildStamp`: `YYYYMMDDHHMM` build number written to `install.build`
//! - label rewriting so repeated deploys never stack version suffixes

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, TimeZone};
use regex::Regex;

/// Version used when a descriptor carries none
pub const DEFAULT_VERSION: &str = "1.0.0";

static STRICT_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+$").expect("valid version regex"));

static LABEL_VERSION_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+v[0-9]+\.[0-9]+\.[0-9]+.*$").expect("valid suffix regex"));

static LABEL_PAREN_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)$").expect("valid paren regex"));

/// A validated `MAJOR.MINOR.PATCH` version
///
/// The original text is kept as-is (leading zeros included) so the value
/// written to the descriptor is exactly what the operator requested.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version(String);

impl Version {
    /// Parse a strict numeric triple. Whitespace is not stripped; callers
    /// reading operator input trim it first.
    pub fn parse(input: &str) -> Option<Self> {
        STRICT_VERSION
            .is_match(input)
            .then(|| Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns `requested` only if it is a strict numeric triple, else `current`.
///
/// Never fails: a malformed request keeps the current version.
pub fn resolve_version(requested: Option<&str>, current: &str) -> String {
    requested
        .and_then(Version::parse)
        .map(|v| v.0)
        .unwrap_or_else(|| current.to_string())
}

/// Build number derived from wall-clock time (`YYYYMMDDHHMM`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BuildStamp(u64);

impl BuildStamp {
    pub fn from_time<Tz: TimeZone>(now: &DateTime<Tz>) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        let formatted = now.format("%Y%m%d%H%M").to_string();
        Self(formatted.parse().unwrap_or_default())
    }

    /// Stamp for `now` that never goes below a previously written build.
    ///
    /// Non-numeric previous values are ignored.
    pub fn next_after<Tz: TimeZone>(now: &DateTime<Tz>, previous: Option<&str>) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        let fresh = Self::from_time(now);
        match previous.and_then(|p| p.trim().parse::<u64>().ok()) {
            Some(prev) if prev > fresh.0 => Self(prev),
            _ => fresh,
        }
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BuildStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strip trailing version and parenthesized suffixes from a label.
///
/// Repeats until nothing more comes off, so `Foo (a) (b)` becomes `Foo`.
pub fn base_label(label: &str) -> String {
    let mut current = label.trim().to_string();
    loop {
        let without_version = LABEL_VERSION_SUFFIX.replace(&current, "");
        let stripped = LABEL_PAREN_SUFFIX.replace(&without_version, "").trim().to_string();
        if stripped == current {
            return current;
        }
        current = stripped;
    }
}

/// Rewrite a label to end in ` v<version>`; idempotent for a fixed version.
pub fn relabel(label: &str, version: &str) -> String {
    format!("{} v{}", base_label(label), version)
}
