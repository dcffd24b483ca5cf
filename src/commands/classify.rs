use anyhow::Result;
use serde::Serialize;

use cachet::domain::services::Classifier;
use cachet::domain::value_objects::CacheTier;

use super::Context;
use crate::ui::json::emit_event;
use crate::ui::json::events::{CompleteEvent, DataEvent, StartEvent};

#[derive(Debug, Serialize)]
struct Classified<'a> {
    path: &'a str,
    tier: CacheTier,
    cache_control: &'a str,
}

pub fn cmd_classify(ctx: &Context, paths: &[String]) -> Result<()> {
    let classifier = Classifier::new(&ctx.config.classifier)?;

    let mut rows = Vec::with_capacity(paths.len());
    for path in paths {
        let tier = classifier.classify(path)?;
        rows.push((path.as_str(), tier));
    }

    if ctx.json {
        emit_event(&StartEvent::new("classify"))?;
        for (path, tier) in &rows {
            emit_event(&DataEvent::new(
                "classified",
                "classify",
                Classified {
                    path,
                    tier: *tier,
                    cache_control: ctx.config.cache_directives.for_tier(*tier),
                },
            ))?;
        }
        emit_event(&CompleteEvent::success("classify"))?;
        return Ok(());
    }

    print!("{}", render(&rows));
    Ok(())
}

/// `tier  path`, one line per input, tier padded to the longest name
fn render(rows: &[(&str, CacheTier)]) -> String {
    let width = CacheTier::ALL
        .iter()
        .map(|t| t.as_str().len())
        .max()
        .unwrap_or(0);
    rows.iter()
        .map(|(path, tier)| format!("{:<width$}  {}\n", tier.as_str(), path, width = width))
        .collect()
}
