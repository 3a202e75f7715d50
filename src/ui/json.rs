//! JSON output utilities for CLI commands.
//!
//! Commands emit NDJSON: one `start` event, then one `complete` event
//! carrying the command's data.

use serde::Serialize;
use serde_json::json;
use std::io::{self, Write};

/// Write a typed event to a custom writer.
pub fn write_typed_event<T: Serialize, W: Write>(out: &mut W, event: &T) -> io::Result<()> {
    let json =
        serde_json::to_string(event).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    out.write_all(json.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Emit a typed event as NDJSON to stdout.
pub fn emit_event<T: Serialize>(event: &T) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write_typed_event(&mut out, event)
}

pub fn emit_start(command: &str) -> io::Result<()> {
    emit_event(&json!({ "event": "start", "command": command }))
}

pub fn emit_complete<T: Serialize>(command: &str, success: bool, data: &T) -> io::Result<()> {
    emit_event(&json!({
        "event": "complete",
        "command": command,
        "status": if success { "success" } else { "failure" },
        "data": data,
    }))
}
