//! Property tests for publication path normalization.

use proptest::prelude::*;

use cachet::AssetPath;

use super::strategies::asset_path;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Normalization is idempotent.
    #[test]
    fn property_normalize_idempotent(path in asset_path()) {
        let once = AssetPath::new(&path).unwrap();
        let twice = AssetPath::new(once.as_str()).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// PROPERTY: Backslash separators normalize to the same path.
    #[test]
    fn property_backslashes_equal_slashes(path in asset_path()) {
        let windows = path.replace('/', "\\");
        prop_assert_eq!(AssetPath::new(&windows).unwrap(), AssetPath::new(&path).unwrap());
    }

    /// PROPERTY: Any `..` segment is rejected.
    #[test]
    fn property_traversal_rejected(prefix in asset_path(), suffix in asset_path()) {
        let hostile = format!("{}/../{}", prefix, suffix);
        prop_assert!(AssetPath::new(&hostile).is_err());
    }

    /// PROPERTY: CDN paths always start with exactly one `/`.
    #[test]
    fn property_cdn_path_rooted(path in asset_path()) {
        let cdn = AssetPath::new(&format!("//{}", path)).unwrap().to_cdn_path();
        prop_assert!(cdn.starts_with('/'));
        prop_assert!(!cdn.starts_with("//"));
    }

    /// PROPERTY: Arbitrary input never panics.
    #[test]
    fn property_new_never_panics(raw in "(?s).{0,128}") {
        let _ = AssetPath::new(&raw);
    }
}
