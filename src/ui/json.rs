//! NDJSON helpers for command-level events
//!
//! Stage progress is written by `JsonEventSink`; these cover the `start`
//! and `complete` envelopes around it and command results.

use std::io::{self, Write};

/// Write a single NDJSON event (one JSON object per line).
pub fn write_event(out: &mut impl Write, event: &serde_json::Value) -> io::Result<()> {
    serde_json::to_writer(&mut *out, event)?;
    out.write_all(b"\n")?;
    out.flush()
}

/// Write to stdout.
pub fn emit(event: serde_json::Value) -> io::Result<()> {
    write_event(&mut io::stdout().lock(), &event)
}

pub fn start(command: &str) -> serde_json::Value {
    serde_json::json!({ "event": "start", "command": command })
}

pub fn complete(command: &str, extra: serde_json::Value) -> serde_json::Value {
    let mut event = serde_json::json!({
        "event": "complete",
        "command": command,
        "success": true,
    });
    if let (Some(obj), serde_json::Value::Object(extra)) = (event.as_object_mut(), extra) {
        obj.extend(extra);
    }
    event
}
