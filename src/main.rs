//! Cachet CLI - cache-aware static site publisher
//!
//! Usage: cachet <COMMAND>
//!
//! Commands:
//!   classify    Show the cache tier of paths
//!   plan        Plan a publication without touching storage
//!   publish     Upload a build in cache-safe order, then invalidate
//!   invalidate  Invalidate CDN paths

mod cli;
mod commands;
mod ui;

use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::Parser;

use cachet::config::ConfigWarning;
use cachet::infrastructure::telemetry;
use cachet::Config;

use cli::{Cli, Commands};
use commands::invalidate::InvalidateFlags;
use commands::publish::PublishFlags;
use commands::Context;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;
    let command = cli.command.name();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ui::error::print_error(&err, command, json);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let (mut config, warnings) = load_config(&cli)?;
    config.logging.level = config.logging.level.raised(cli.verbose);

    // A subscriber already installed (e.g. by a test harness) is fine
    if let Err(err) = telemetry::init(&config.logging) {
        eprintln!("{}", err);
    }
    if !warnings.is_empty() {
        ui::output::print_config_warnings(&warnings);
    }

    let ctx = Context {
        config,
        json: cli.json,
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Classify { paths } => commands::classify::cmd_classify(&ctx, &paths),
        Commands::Plan {
            source,
            remote_listing,
        } => commands::plan::cmd_plan(&ctx, &source, remote_listing.as_deref()),
        Commands::Publish {
            source,
            dry_run,
            no_delete,
            no_wait,
        } => commands::publish::cmd_publish(
            &ctx,
            &source,
            PublishFlags {
                dry_run,
                no_delete,
                no_wait,
            },
        ),
        Commands::Invalidate {
            paths,
            all,
            yes,
            no_wait,
        } => commands::invalidate::cmd_invalidate(
            &ctx,
            InvalidateFlags {
                paths,
                all,
                yes,
                no_wait,
            },
        ),
    }
}

fn load_config(cli: &Cli) -> Result<(Config, Vec<ConfigWarning>)> {
    if let Some(path) = &cli.config {
        let (config, warnings) = Config::load_with_warnings(path)
            .with_context(|| format!("loading {}", path.display()))?;
        return Ok((config.with_env_overrides(), warnings));
    }

    let cwd = std::env::current_dir().context("reading current directory")?;
    Ok(Config::load_or_default(Some(&cwd))?)
}
