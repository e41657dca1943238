//! Newline-delimited JSON for `_bulk` and `_msearch` bodies.
//!
//! Each value is written compactly on its own line and every line, the last
//! one included, ends with `\n`. The engine rejects a bulk body without the
//! final newline.

use crate::{Error, Payload, Result};

/// Content type sent with NDJSON bodies.
pub const CONTENT_TYPE: &str = "application/x-ndjson";

/// Encode a sequence of values as NDJSON.
///
/// An empty sequence encodes to the empty string.
pub fn encode(lines: &[Payload]) -> Result<String> {
    let mut out = String::new();
    for line in lines {
        let json = serde_json::to_string(line).map_err(|e| Error::Encode(e.to_string()))?;
        out.push_str(&json);
        out.push('\n');
    }
    Ok(out)
}

/// Decode an NDJSON body back into its values.
///
/// Blank lines are skipped. A malformed line fails with its 1-based number.
pub fn decode(body: &str) -> Result<Vec<Payload>> {
    body.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|e| Error::Decode(format!("line {}: {}", idx + 1, e)))
        })
        .collect()
}
