//! Property tests for the invalidation selector.

use proptest::prelude::*;

use cachet::config::InvalidationPolicy;
use cachet::{CacheTier, InvalidationSelector};

use super::strategies::{asset_path, classifier};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Entry-only selection yields the entry point or nothing.
    #[test]
    fn property_entry_only_selects_entry(
        changed in proptest::collection::vec(asset_path(), 0..16),
        include_entry in any::<bool>(),
    ) {
        let mut changed = changed;
        if include_entry {
            changed.push("index.html".to_string());
        }
        let c = classifier();
        let selection = InvalidationSelector::new(&c)
            .select(&changed, &InvalidationPolicy::default())
            .unwrap();

        if changed.iter().any(|p| p == "index.html") {
            prop_assert_eq!(selection.request.paths, vec!["/index.html".to_string()]);
        } else {
            prop_assert!(selection.request.is_empty());
        }
        prop_assert!(!selection.request.is_wildcard);
    }

    /// PROPERTY: Broad selection never contains an immutable path and
    /// output is sorted, unique and rooted.
    #[test]
    fn property_broad_selection_excludes_immutable(
        changed in proptest::collection::vec(asset_path(), 0..16),
    ) {
        let c = classifier();
        let policy = InvalidationPolicy { entry_only: false, ..InvalidationPolicy::default() };
        let selection = InvalidationSelector::new(&c).select(&changed, &policy).unwrap();

        for path in &selection.request.paths {
            prop_assert!(path.starts_with('/'));
            prop_assert_ne!(c.classify(path).unwrap(), CacheTier::Immutable);
        }
        prop_assert!(selection.request.paths.windows(2).all(|w| w[0] < w[1]));

        let expected = changed
            .iter()
            .filter(|p| c.classify(p).unwrap() != CacheTier::Immutable)
            .collect::<std::collections::BTreeSet<_>>()
            .len();
        prop_assert_eq!(selection.request.paths.len(), expected);
    }

    /// PROPERTY: An unconfirmed wildcard always fails.
    #[test]
    fn property_unconfirmed_wildcard_fails(
        changed in proptest::collection::vec(asset_path(), 0..8),
        entry_only in any::<bool>(),
    ) {
        let c = classifier();
        let policy = InvalidationPolicy { entry_only, ..InvalidationPolicy::wildcard(false) };
        prop_assert!(InvalidationSelector::new(&c).select(&changed, &policy).is_err());
    }
}
