//! Property tests for version parsing and build stamps.

use chrono::{Local, TimeZone};
use proptest::prelude::*;

use appdeploy::domain::value_objects::{resolve_version, BuildStamp, Version};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Parsing arbitrary input never panics.
    #[test]
    fn property_parse_never_panics(s in "(?s).{0,64}") {
        let _ = Version::parse(&s);
    }

    /// PROPERTY: Any numeric triple is accepted and kept verbatim.
    #[test]
    fn property_numeric_triples_accepted(
        major in 0u32..10_000,
        minor in 0u32..10_000,
        patch in 0u32..10_000,
    ) {
        let text = format!("{major}.{minor}.{patch}");
        let parsed = Version::parse(&text);
        prop_assert_eq!(parsed.map(|v| v.to_string()), Some(text));
    }

    /// PROPERTY: A bare numeric triple replaces the current version.
    #[test]
    fn property_resolve_accepts_bare_triples(
        major in 0u32..1000,
        minor in 0u32..1000,
        patch in 0u32..1000,
    ) {
        let requested = format!("{major}.{minor}.{patch}");
        prop_assert_eq!(resolve_version(Some(&requested), "1.0.0"), requested);
    }

    /// PROPERTY: Padded or otherwise decorated triples keep the current version.
    #[test]
    fn property_resolve_keeps_current_for_decorated_triples(
        major in 0u32..1000,
        minor in 0u32..1000,
        patch in 0u32..1000,
        prefix in prop::sample::select(vec!["", " ", "\t", "v", "\n"]),
        suffix in prop::sample::select(vec!["", " ", "\n", ".0", "-beta", "a"]),
    ) {
        prop_assume!(!(prefix.is_empty() && suffix.is_empty()));
        let requested = format!("{prefix}{major}.{minor}.{patch}{suffix}");
        prop_assert_eq!(resolve_version(Some(&requested), "1.0.0"), "1.0.0");
    }

    /// PROPERTY: Input without three dot-separated digit groups keeps current.
    #[test]
    fn property_resolve_keeps_current_for_non_triples(requested in "[0-9a-z]{0,6}(\\.[0-9a-z]{0,6})?") {
        prop_assert_eq!(resolve_version(Some(&requested), "1.0.0"), "1.0.0");
    }

    /// PROPERTY: A new build stamp never goes below the one it replaces.
    #[test]
    fn property_build_stamp_non_decreasing(
        previous in 0u64..=999_999_999_999,
        minutes in 0i64..(60 * 24 * 365 * 30),
    ) {
        let base = Local.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        let now = base + chrono::Duration::minutes(minutes);

        let stamp = BuildStamp::next_after(&now, Some(&previous.to_string()));
        prop_assert!(stamp.value() >= previous);
        prop_assert!(stamp >= BuildStamp::from_time(&now));
    }
}
