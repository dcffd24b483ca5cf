//! Invalidation selection service
//!
//! Picks the smallest set of CDN paths worth paying for. Hashed assets are
//! never invalidated: their URL already changed with their content.

use std::collections::BTreeSet;

use crate::config::InvalidationPolicy;
use crate::domain::entities::{InvalidationRequest, InvalidationSelection};
use crate::domain::value_objects::{AssetPath, CacheTier, CostWarning};
use crate::error::{CachetError, CachetResult};

use super::Classifier;

/// Pure invalidation selector
#[derive(Debug, Clone, Copy)]
pub struct InvalidationSelector<'a> {
    classifier: &'a Classifier,
}

impl<'a> InvalidationSelector<'a> {
    pub fn new(classifier: &'a Classifier) -> Self {
        Self { classifier }
    }

    /// Select the paths to invalidate
    ///
    /// `changed_paths` may be given with or without a leading `/`.
    ///
    /// # Errors
    /// `UnconfirmedWildcard` when `policy.wildcard` is set without
    /// `explicit_wildcard_confirmed`; `InvalidPath` for unusable input.
    pub fn select<I, S>(
        &self,
        changed_paths: I,
        policy: &InvalidationPolicy,
    ) -> CachetResult<InvalidationSelection>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if policy.wildcard {
            if !policy.explicit_wildcard_confirmed {
                return Err(CachetError::UnconfirmedWildcard);
            }
            return Ok(InvalidationSelection {
                request: InvalidationRequest::wildcard(),
                warning: None,
            });
        }

        let mut selected: BTreeSet<String> = BTreeSet::new();
        for raw in changed_paths {
            let raw = raw.as_ref();
            let path = AssetPath::new(raw).map_err(|e| CachetError::InvalidPath {
                path: raw.to_string(),
                reason: e.to_string(),
            })?;
            let tier = self.classifier.classify_path(&path)?;

            let keep = if policy.entry_only {
                tier == CacheTier::EntryPoint
            } else {
                tier != CacheTier::Immutable
            };
            if keep {
                selected.insert(path.to_cdn_path());
            }
        }

        let warning = match policy.max_discrete_paths {
            Some(limit) if selected.len() > limit => Some(CostWarning {
                path_count: selected.len(),
                limit,
            }),
            _ => None,
        };

        Ok(InvalidationSelection {
            request: InvalidationRequest::discrete(selected.into_iter().collect()),
            warning,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClassifierConfig;

    fn classifier() -> Classifier {
        Classifier::new(&ClassifierConfig::default()).unwrap()
    }

    fn policy(entry_only: bool) -> InvalidationPolicy {
        InvalidationPolicy {
            entry_only,
            ..InvalidationPolicy::default()
        }
    }

    #[test]
    fn entry_only_keeps_just_the_entry_point() {
        let c = classifier();
        let selection = InvalidationSelector::new(&c)
            .select(
                ["/index.html", "/about.html", "/app.abc123.js"],
                &InvalidationPolicy::default(),
            )
            .unwrap();

        assert_eq!(selection.request.paths, vec!["/index.html"]);
        assert!(!selection.request.is_wildcard);
        assert!(selection.warning.is_none());
    }

    #[test]
    fn entry_only_with_unchanged_entry_is_empty() {
        let c = classifier();
        let selection = InvalidationSelector::new(&c)
            .select(["/about.html"], &InvalidationPolicy::default())
            .unwrap();
        assert!(selection.request.is_empty());
    }

    #[test]
    fn broad_selection_keeps_non_immutable() {
        let c = classifier();
        let selection = InvalidationSelector::new(&c)
            .select(["/about.html"], &policy(false))
            .unwrap();
        assert_eq!(selection.request.paths, vec!["/about.html"]);
    }

    #[test]
    fn broad_selection_never_includes_hashed_assets() {
        let c = classifier();
        let selection = InvalidationSelector::new(&c)
            .select(
                ["index.html", "logo.png", "app.abc123.js", "css/site.f00ba4.css"],
                &policy(false),
            )
            .unwrap();
        assert_eq!(selection.request.paths, vec!["/index.html", "/logo.png"]);
    }

    #[test]
    fn paths_are_deduplicated_and_sorted() {
        let c = classifier();
        let selection = InvalidationSelector::new(&c)
            .select(["/b.html", "b.html", "/a.html", "./a.html"], &policy(false))
            .unwrap();
        assert_eq!(selection.request.paths, vec!["/a.html", "/b.html"]);
    }

    #[test]
    fn wildcard_requires_confirmation() {
        let c = classifier();
        let err = InvalidationSelector::new(&c)
            .select(["/index.html"], &InvalidationPolicy::wildcard(false))
            .unwrap_err();
        assert!(matches!(err, CachetError::UnconfirmedWildcard));
    }

    #[test]
    fn confirmed_wildcard() {
        let c = classifier();
        let selection = InvalidationSelector::new(&c)
            .select(Vec::<String>::new(), &InvalidationPolicy::wildcard(true))
            .unwrap();
        assert_eq!(selection.request.paths, vec!["/*"]);
        assert!(selection.request.is_wildcard);
    }

    #[test]
    fn confirmation_alone_does_not_select_wildcard() {
        let c = classifier();
        let policy = InvalidationPolicy {
            explicit_wildcard_confirmed: true,
            ..InvalidationPolicy::default()
        };
        let selection = InvalidationSelector::new(&c)
            .select(["/index.html"], &policy)
            .unwrap();
        assert!(!selection.request.is_wildcard);
        assert_eq!(selection.request.paths, vec!["/index.html"]);
    }

    #[test]
    fn over_budget_raises_cost_warning() {
        let c = classifier();
        let policy = InvalidationPolicy {
            entry_only: false,
            max_discrete_paths: Some(2),
            ..InvalidationPolicy::default()
        };
        let selection = InvalidationSelector::new(&c)
            .select(["/a.html", "/b.html", "/c.html"], &policy)
            .unwrap();

        assert_eq!(selection.request.paths.len(), 3);
        assert_eq!(
            selection.warning,
            Some(CostWarning {
                path_count: 3,
                limit: 2
            })
        );
    }

    #[test]
    fn at_budget_has_no_warning() {
        let c = classifier();
        let policy = InvalidationPolicy {
            entry_only: false,
            max_discrete_paths: Some(2),
            ..InvalidationPolicy::default()
        };
        let selection = InvalidationSelector::new(&c)
            .select(["/a.html", "/b.html"], &policy)
            .unwrap();
        assert!(selection.warning.is_none());
    }

    #[test]
    fn root_path_is_invalid() {
        let c = classifier();
        let err = InvalidationSelector::new(&c)
            .select(["/"], &policy(false))
            .unwrap_err();
        assert!(matches!(err, CachetError::InvalidPath { .. }));
    }
}
