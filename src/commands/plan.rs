use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result};
use serde::Serialize;

use cachet::application::PlanPipeline;
use cachet::domain::entities::{InvalidationSelection, PublicationPlan, RemoteListing};
use cachet::domain::value_objects::AssetPath;
use cachet::CachetError;

use super::Context;
use crate::ui::json::emit_event;
use crate::ui::json::events::{CompleteEvent, DataEvent, StartEvent};
use crate::ui::output::render_plan;

#[derive(Debug, Serialize)]
struct PlanData<'a> {
    plan: &'a PublicationPlan,
    invalidation: &'a InvalidationSelection,
}

pub fn cmd_plan(ctx: &Context, source: &Path, remote_listing: Option<&Path>) -> Result<()> {
    let pipeline = PlanPipeline::from_config(&ctx.config)?;

    let listing = remote_listing.map(read_listing).transpose()?;
    let plan = pipeline.plan(source, listing.as_ref())?;
    let selection = pipeline
        .selector()
        .select(plan.changed_paths(), &ctx.config.invalidation)?;

    if ctx.json {
        emit_event(&StartEvent::new("plan"))?;
        emit_event(&DataEvent::new(
            "plan",
            "plan",
            PlanData {
                plan: &plan,
                invalidation: &selection,
            },
        ))?;
        emit_event(&CompleteEvent::success("plan"))?;
        return Ok(());
    }

    print!("{}", render_plan(source, &plan, &selection));
    Ok(())
}

/// One remote path per line; blank lines and `#` comments are ignored
fn read_listing(path: &Path) -> Result<RemoteListing> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading remote listing {}", path.display()))?;
    Ok(parse_listing(&content)?)
}

fn parse_listing(content: &str) -> Result<RemoteListing, CachetError> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| {
            AssetPath::new(line).map_err(|e| CachetError::InvalidPath {
                path: line.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_listing_skips_comments_and_blanks() {
        let listing = parse_listing("# bucket dump\n\n/index.html\nold/page.html\n").unwrap();
        let paths: Vec<&str> = listing.paths().map(AssetPath::as_str).collect();
        assert_eq!(paths, vec!["index.html", "old/page.html"]);
    }

    #[test]
    fn parse_listing_rejects_traversal() {
        assert!(matches!(
            parse_listing("../etc/passwd"),
            Err(CachetError::InvalidPath { .. })
        ));
    }
}
