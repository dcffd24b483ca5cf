//! Console Event Sink
//!
//! One human-readable line per event.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::ports::{PublishEvent, PublishEventSink};

/// Event sink that prints progress lines
pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    detailed: bool,
}

impl ConsoleEventSink {
    /// Progress on stdout; per-object lines only when `detailed`
    pub fn stdout(detailed: bool) -> Self {
        Self::with_writer(io::stdout(), detailed)
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W, detailed: bool) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            detailed,
        }
    }

    fn line(&self, text: String) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", text);
        }
    }
}

fn format_event(event: &PublishEvent) -> String {
    match event {
        PublishEvent::Started {
            destination,
            file_count,
            dry_run,
        } => {
            let mode = if *dry_run { " (dry run)" } else { "" };
            format!("Publishing {} files to {}{}", file_count, destination, mode)
        }
        PublishEvent::BatchStarted {
            tier,
            cache_control,
            count,
        } => format!("[{}] {} files  Cache-Control: {}", tier, count, cache_control),
        PublishEvent::Uploaded { path, .. } => format!("  + {}", path),
        PublishEvent::Skipped { path } => format!("  = {}", path),
        PublishEvent::Deleted { path } => format!("  - {}", path),
        PublishEvent::CostWarning(warning) => format!("Warning: {}", warning),
        PublishEvent::InvalidationCreated { id, paths } => {
            format!("Invalidation {} created for {}", id, paths.join(" "))
        }
        PublishEvent::InvalidationPolled { id, status } => {
            format!("Invalidation {}: {}", id, status)
        }
        PublishEvent::Completed {
            uploaded,
            skipped,
            deleted,
            invalidated,
        } => format!(
            "Done: {} uploaded, {} unchanged, {} deleted, {} invalidated",
            uploaded, skipped, deleted, invalidated
        ),
    }
}

impl PublishEventSink for ConsoleEventSink {
    fn on_event(&self, event: PublishEvent) {
        let per_object = matches!(
            event,
            PublishEvent::Uploaded { .. }
                | PublishEvent::Skipped { .. }
                | PublishEvent::Deleted { .. }
                | PublishEvent::InvalidationPolled { .. }
        );
        if per_object && !self.detailed {
            return;
        }
        self.line(format_event(&event));
    }

    fn wants_detailed_events(&self) -> bool {
        self.detailed
    }
}
