use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};

/// Cachet - cache-aware static site publisher
#[derive(Parser, Debug)]
#[command(name = "cachet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to ./cachet.toml, then the user config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output NDJSON events for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the cache tier and directive of each path
    Classify {
        /// Publication-relative paths
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Plan a publication without touching storage
    Plan {
        /// Build output directory
        #[arg(short, long, default_value = "dist")]
        source: PathBuf,

        /// File listing the current remote objects, one path per line
        #[arg(long)]
        remote_listing: Option<PathBuf>,
    },

    /// Upload a build in cache-safe order, then invalidate
    Publish {
        /// Build output directory
        #[arg(short, long, default_value = "dist")]
        source: PathBuf,

        /// Show what would be done
        #[arg(long)]
        dry_run: bool,

        /// Keep remote objects that are no longer in the build
        #[arg(long)]
        no_delete: bool,

        /// Return as soon as the invalidation is submitted
        #[arg(long)]
        no_wait: bool,
    },

    /// Invalidate CDN paths
    #[command(group(ArgGroup::new("target").required(true).args(["paths", "all"])))]
    Invalidate {
        /// Paths to invalidate (comma-separated or repeated)
        #[arg(long, value_delimiter = ',', num_args = 1..)]
        paths: Vec<String>,

        /// Invalidate everything (`/*`)
        #[arg(long)]
        all: bool,

        /// Confirm a wildcard invalidation without prompting
        #[arg(short, long)]
        yes: bool,

        /// Return as soon as the invalidation is submitted
        #[arg(long)]
        no_wait: bool,
    },
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Classify { .. } => "classify",
            Commands::Plan { .. } => "plan",
            Commands::Publish { .. } => "publish",
            Commands::Invalidate { .. } => "invalidate",
        }
    }
}
