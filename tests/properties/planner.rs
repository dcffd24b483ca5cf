//! Property tests for the publication planner.

use std::collections::BTreeSet;

use proptest::prelude::*;

use cachet::config::CacheDirectives;
use cachet::{AssetPath, CacheTier, Planner, RemoteListing};

use super::strategies::{asset_path, manifest_paths, records};

fn planner() -> Planner {
    Planner::new(CacheDirectives::default(), "index.html")
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Batches are strictly ascending by tier and the entry point is last.
    #[test]
    fn property_batches_ascend_with_entry_last(paths in manifest_paths()) {
        let plan = planner().plan(&records(&paths), None).unwrap();
        let tiers: Vec<CacheTier> = plan.upload_batches().iter().map(|b| b.tier).collect();

        prop_assert!(tiers.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(tiers.last().copied(), Some(CacheTier::EntryPoint));
        prop_assert!(plan.upload_batches().iter().all(|b| !b.is_empty()));
    }

    /// PROPERTY: Every record lands in exactly one batch.
    #[test]
    fn property_batches_partition_manifest(paths in manifest_paths()) {
        let plan = planner().plan(&records(&paths), None).unwrap();
        let planned: BTreeSet<&str> = plan.records().map(|r| r.path().as_str()).collect();
        let expected: BTreeSet<&str> = paths.iter().map(String::as_str).collect();

        prop_assert_eq!(plan.total_files(), paths.len());
        prop_assert_eq!(planned, expected);
    }

    /// PROPERTY: Deletions are exactly previous minus current.
    #[test]
    fn property_deletions_are_set_difference(
        paths in manifest_paths(),
        remote in proptest::collection::btree_set(asset_path(), 0..24),
    ) {
        let listing: RemoteListing = remote
            .iter()
            .map(|p| AssetPath::new(p).unwrap())
            .collect();
        let plan = planner().plan(&records(&paths), Some(&listing)).unwrap();

        let current: BTreeSet<&String> = paths.iter().collect();
        let expected: BTreeSet<&str> = remote
            .iter()
            .filter(|p| !current.contains(p))
            .map(String::as_str)
            .collect();
        let actual: BTreeSet<&str> = plan.deletions().iter().map(AssetPath::as_str).collect();
        prop_assert_eq!(actual, expected);
    }

    /// PROPERTY: Input order does not affect the plan.
    #[test]
    fn property_order_independent(
        paths in manifest_paths(),
        seed in any::<u64>(),
    ) {
        let forward = records(&paths);
        let mut shuffled = forward.clone();
        // Deterministic rotation plus reversal stands in for a shuffle
        if !shuffled.is_empty() {
            let k = (seed as usize) % shuffled.len();
            shuffled.rotate_left(k);
        }
        shuffled.reverse();

        prop_assert_eq!(
            planner().plan(&forward, None).unwrap(),
            planner().plan(&shuffled, None).unwrap()
        );
    }

    /// PROPERTY: Planning twice yields identical, identically serialized plans.
    #[test]
    fn property_idempotent(paths in manifest_paths()) {
        let manifest = records(&paths);
        let a = planner().plan(&manifest, None).unwrap();
        let b = planner().plan(&manifest, None).unwrap();
        prop_assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
        prop_assert_eq!(a, b);
    }
}
