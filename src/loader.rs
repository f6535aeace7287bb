//! Record loader: one JSON document per line, kept in file order.

use crate::ndjson::NdjsonReader;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

/// Knobs for `read_records_with`.
#[derive(Clone, Copy, Debug)]
pub struct LoadOptions {
    /// Skip (and warn about) lines that are not valid JSON instead of aborting.
    pub skip_malformed: bool,
    pub read_buffer_bytes: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { skip_malformed: false, read_buffer_bytes: 256 * 1024 }
    }
}

/// Read every non-empty line of `path` as a JSON record.
/// Any malformed line fails the whole load. Returns `(count, records)`.
pub fn read_records(path: &Path) -> Result<(usize, Vec<Value>)> {
    read_records_with(path, &LoadOptions::default())
}

pub fn read_records_with(path: &Path, opts: &LoadOptions) -> Result<(usize, Vec<Value>)> {
    let mut rdr = NdjsonReader::open(path, opts.read_buffer_bytes)?;
    let mut records = Vec::new();
    let mut skipped = 0usize;
    let mut buf = String::with_capacity(16 * 1024);

    while rdr.read_line(&mut buf).with_context(|| format!("read {}", path.display()))? > 0 {
        let line = buf.trim();
        if line.is_empty() { continue; }
        match serde_json::from_str::<Value>(line) {
            Ok(v) => records.push(v),
            Err(e) if opts.skip_malformed => {
                tracing::warn!(path = %path.display(), line = rdr.line_no(), error = %e, "skipping malformed JSON line");
                skipped += 1;
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("malformed JSON at {}:{}", path.display(), rdr.line_no())
                });
            }
        }
    }

    if skipped > 0 {
        tracing::info!("Skipped {} malformed line(s) in {}", skipped, path.display());
    }
    tracing::debug!("Loaded {} records from {}", records.len(), path.display());
    Ok((records.len(), records))
}
