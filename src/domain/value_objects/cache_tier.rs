//! Cache tier value object
//!
//! Every published file lands in exactly one tier. The derived `Ord`
//! follows declaration order, which is also the upload order: a tier is
//! only made visible once every tier before it has been uploaded.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Cache-lifetime bucket assigned to a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CacheTier {
    /// Content-hashed asset; path changes whenever content changes
    Immutable,
    /// Images, fonts and video
    Media,
    /// Anything that matched no other rule
    GenericStatic,
    /// HTML other than the site entry document
    SecondaryHtml,
    /// The site entry document, never cached
    EntryPoint,
}

impl CacheTier {
    /// All tiers in upload order
    pub const ALL: [CacheTier; 5] = [
        CacheTier::Immutable,
        CacheTier::Media,
        CacheTier::GenericStatic,
        CacheTier::SecondaryHtml,
        CacheTier::EntryPoint,
    ];

    /// Upload precedence, 1-based (lowest uploads first)
    pub fn rank(self) -> u8 {
        match self {
            CacheTier::Immutable => 1,
            CacheTier::Media => 2,
            CacheTier::GenericStatic => 3,
            CacheTier::SecondaryHtml => 4,
            CacheTier::EntryPoint => 5,
        }
    }

    /// Built-in `Cache-Control` directive for this tier
    pub fn default_directive(self) -> &'static str {
        match self {
            CacheTier::Immutable => "max-age=31536000, immutable",
            CacheTier::Media => "max-age=604800",
            CacheTier::GenericStatic => "max-age=86400",
            CacheTier::SecondaryHtml => "max-age=300",
            CacheTier::EntryPoint => "no-cache, no-store, must-revalidate",
        }
    }

    /// Stable kebab-case name, as used in config files and JSON output
    pub fn as_str(self) -> &'static str {
        match self {
            CacheTier::Immutable => "immutable",
            CacheTier::Media => "media",
            CacheTier::GenericStatic => "generic-static",
            CacheTier::SecondaryHtml => "secondary-html",
            CacheTier::EntryPoint => "entry-point",
        }
    }
}

impl fmt::Display for CacheTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CacheTier::ALL
            .into_iter()
            .find(|tier| tier.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| format!("unknown cache tier '{}'", s))
    }
}
