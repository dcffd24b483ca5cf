use std::path::Path;

use cachet::config::ConfigWarning;
use cachet::domain::entities::{InvalidationSelection, PublicationPlan};

pub fn print_config_warnings(warnings: &[ConfigWarning]) {
    for w in warnings {
        eprintln!("⚠ {}", w);
        if let Some(suggestion) = &w.suggestion {
            eprintln!("   Did you mean '{}'?", suggestion);
        }
    }
}

/// Human rendering of a plan and its invalidation preview
pub fn render_plan(
    source: &Path,
    plan: &PublicationPlan,
    selection: &InvalidationSelection,
) -> String {
    let mut out = format!(
        "Plan for {} ({} files, {} bytes)\n",
        source.display(),
        plan.total_files(),
        plan.total_bytes()
    );

    for batch in plan.upload_batches() {
        out.push_str(&format!(
            "\n[{}] Cache-Control: {}\n",
            batch.tier, batch.cache_control
        ));
        for asset in &batch.assets {
            let marker = if plan.is_unchanged(asset.path()) {
                "="
            } else {
                "+"
            };
            out.push_str(&format!("  {} {}\n", marker, asset.path()));
        }
    }

    if !plan.deletions().is_empty() {
        out.push_str(&format!("\nDeletions ({}):\n", plan.deletions().len()));
        for path in plan.deletions() {
            out.push_str(&format!("  - {}\n", path));
        }
    }

    let request = &selection.request;
    if request.is_empty() {
        out.push_str("\nInvalidation: none\n");
    } else {
        out.push_str(&format!("\nInvalidation: {}\n", request.paths.join(" ")));
    }
    if let Some(warning) = &selection.warning {
        out.push_str(&format!("⚠ {}\n", warning));
    }
    out
}
