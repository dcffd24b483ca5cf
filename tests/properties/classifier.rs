//! Property tests for the asset classifier.

use proptest::prelude::*;

use cachet::CacheTier;

use super::strategies::{asset_path, classifier};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Classification is a pure function of the path.
    #[test]
    fn property_classification_is_deterministic(path in asset_path()) {
        let c = classifier();
        let first = c.classify(&path).unwrap();
        prop_assert_eq!(c.classify(&path).unwrap(), first);
        prop_assert_eq!(classifier().classify(&path).unwrap(), first);
    }

    /// PROPERTY: Leading `/` and `./` never change the tier.
    #[test]
    fn property_prefix_forms_agree(path in asset_path()) {
        let c = classifier();
        let bare = c.classify(&path).unwrap();
        prop_assert_eq!(c.classify(&format!("/{}", path)).unwrap(), bare);
        prop_assert_eq!(c.classify(&format!("./{}", path)).unwrap(), bare);
    }

    /// PROPERTY: Only the root entry file is the entry point.
    #[test]
    fn property_entry_point_only_at_root(path in asset_path()) {
        let tier = classifier().classify(&path).unwrap();
        if tier == CacheTier::EntryPoint {
            prop_assert_eq!(path.as_str(), "index.html");
        }
    }

    /// PROPERTY: Arbitrary input never panics.
    #[test]
    fn property_classify_never_panics(raw in "(?s).{0,64}") {
        let _ = classifier().classify(&raw);
    }
}
