//! Property tests for label rewriting.

use proptest::prelude::*;

use appdeploy::domain::value_objects::{base_label, relabel};

fn label() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z][A-Za-z0-9 _-]{0,24}( v[0-9]\\.[0-9]\\.[0-9])?( \\([a-z]{1,8}\\)){0,3}")
        .unwrap()
}

fn version() -> impl Strategy<Value = String> {
    (0u32..100, 0u32..100, 0u32..100).prop_map(|(a, b, c)| format!("{a}.{b}.{c}"))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Relabelling twice with the same version changes nothing.
    #[test]
    fn property_relabel_idempotent(l in label(), v in version()) {
        let once = relabel(&l, &v);
        prop_assert_eq!(relabel(&once, &v), once);
    }

    /// PROPERTY: A relabelled label carries exactly one version suffix.
    #[test]
    fn property_single_suffix(l in label(), first in version(), second in version()) {
        let relabelled = relabel(&relabel(&l, &first), &second);
        let suffix = format!(" v{second}");
        prop_assert!(relabelled.ends_with(&suffix));
        prop_assert_eq!(relabelled.matches(" v").count(), base_label(&l).matches(" v").count() + 1);
    }

    /// PROPERTY: Label rewriting never panics.
    #[test]
    fn property_base_label_never_panics(s in "(?s).{0,64}") {
        let _ = base_label(&s);
    }
}
