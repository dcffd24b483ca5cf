//! JSON Event Sink
//!
//! Outputs publish events as NDJSON for CI/automation consumption.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::ports::{PublishEvent, PublishEventSink};

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    command: &'static str,
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout(command: &'static str) -> Self {
        Self::with_writer(command, io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(command: &'static str, writer: W) -> Self {
        Self {
            command,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl PublishEventSink for JsonEventSink {
    fn on_event(&self, event: PublishEvent) {
        let command = self.command;
        let json = match event {
            PublishEvent::Started {
                destination,
                file_count,
                dry_run,
            } => serde_json::json!({
                "event": "start",
                "command": command,
                "destination": destination,
                "file_count": file_count,
                "dry_run": dry_run,
            }),

            PublishEvent::BatchStarted {
                tier,
                cache_control,
                count,
            } => serde_json::json!({
                "event": "batch_start",
                "command": command,
                "tier": tier,
                "cache_control": cache_control,
                "count": count,
            }),

            PublishEvent::Uploaded { path, tier } => serde_json::json!({
                "event": "item_uploaded",
                "command": command,
                "path": path,
                "tier": tier,
            }),

            PublishEvent::Skipped { path } => serde_json::json!({
                "event": "item_skipped",
                "command": command,
                "path": path,
            }),

            PublishEvent::Deleted { path } => serde_json::json!({
                "event": "item_deleted",
                "command": command,
                "path": path,
            }),

            PublishEvent::CostWarning(warning) => serde_json::json!({
                "event": "warning",
                "command": command,
                "kind": "cost",
                "path_count": warning.path_count,
                "limit": warning.limit,
                "message": warning.to_string(),
            }),

            PublishEvent::InvalidationCreated { id, paths } => serde_json::json!({
                "event": "invalidation_created",
                "command": command,
                "id": id,
                "paths": paths,
            }),

            PublishEvent::InvalidationPolled { id, status } => serde_json::json!({
                "event": "invalidation_status",
                "command": command,
                "id": id,
                "status": status,
            }),

            PublishEvent::Completed {
                uploaded,
                skipped,
                deleted,
                invalidated,
            } => serde_json::json!({
                "event": "complete",
                "command": command,
                "status": "success",
                "uploaded": uploaded,
                "skipped": skipped,
                "deleted": deleted,
                "invalidated": invalidated,
            }),
        };

        self.write_event(json);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{AssetPath, CacheTier, CostWarning};
    use std::sync::{Arc, Mutex};

    struct TestWriter {
        buffer: Arc<Mutex<Vec<u8>>>,
    }

    impl TestWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buffer = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    buffer: buffer.clone(),
                },
                buffer,
            )
        }
    }

    impl Write for TestWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn lines(buffer: &Arc<Mutex<Vec<u8>>>) -> Vec<serde_json::Value> {
        String::from_utf8(buffer.lock().unwrap().clone())
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn json_sink_outputs_start_event() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer("publish", writer);

        sink.on_event(PublishEvent::Started {
            destination: "memory".to_string(),
            file_count: 5,
            dry_run: false,
        });

        let events = lines(&buffer);
        assert_eq!(events[0]["event"], "start");
        assert_eq!(events[0]["command"], "publish");
        assert_eq!(events[0]["file_count"], 5);
    }

    #[test]
    fn json_sink_serializes_tier_and_path() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer("publish", writer);

        sink.on_event(PublishEvent::Uploaded {
            path: AssetPath::new("index.html").unwrap(),
            tier: CacheTier::EntryPoint,
        });

        let events = lines(&buffer);
        assert_eq!(events[0]["path"], "index.html");
        assert_eq!(events[0]["tier"], "entry-point");
    }

    #[test]
    fn json_sink_outputs_cost_warning() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer("invalidate", writer);

        sink.on_event(PublishEvent::CostWarning(CostWarning {
            path_count: 40,
            limit: 30,
        }));

        let events = lines(&buffer);
        assert_eq!(events[0]["event"], "warning");
        assert_eq!(events[0]["path_count"], 40);
    }

    #[test]
    fn json_sink_outputs_complete_event() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer("publish", writer);

        sink.on_event(PublishEvent::Completed {
            uploaded: 10,
            skipped: 5,
            deleted: 2,
            invalidated: 1,
        });

        let events = lines(&buffer);
        assert_eq!(events[0]["event"], "complete");
        assert_eq!(events[0]["status"], "success");
        assert_eq!(events[0]["uploaded"], 10);
    }
}
