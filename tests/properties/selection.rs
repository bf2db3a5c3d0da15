//! Property tests for operator selection parsing.

use proptest::prelude::*;

use appdeploy::domain::value_objects::UnitSelection;

fn available() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::btree_set("[a-z][a-z0-9_]{0,8}", 1..8)
        .prop_map(|names| names.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Selected names always come from the available list, without repeats.
    #[test]
    fn property_selection_subset_without_duplicates(
        names in available(),
        input in "[a-z0-9_, ]{0,40}",
    ) {
        let selection = UnitSelection::parse(&input, &names);
        for unit in &selection.units {
            prop_assert!(names.contains(unit));
        }
        let mut deduped = selection.units.clone();
        deduped.sort();
        deduped.dedup();
        prop_assert_eq!(deduped.len(), selection.units.len());
    }

    /// PROPERTY: Menu numbers map onto the listing, 1-based.
    #[test]
    fn property_numbers_index_listing(names in available(), pick in 0usize..8) {
        prop_assume!(pick < names.len());
        let selection = UnitSelection::parse(&(pick + 1).to_string(), &names);
        prop_assert_eq!(selection.units, vec![names[pick].clone()]);
    }
}
