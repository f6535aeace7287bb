//! Persisting the output table. Every format writes to `<out>.tmp` first and
//! is promoted over the destination only once fully flushed.

use crate::ndjson::NdjsonWriter;
use crate::table::TweetTable;
use crate::util::{create_with_backoff, open_with_backoff, remove_with_backoff, replace_file_atomic_backoff};
use anyhow::{bail, Context, Result};
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// On-disk format of the output table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated, header row first.
    Csv,
    /// One JSON object per row, keyed by column name.
    Jsonl,
}

fn tmp_path_for(out: &Path) -> PathBuf {
    let mut name = out.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    out.with_file_name(name)
}

/// Write `table` to `out`. An existing file is replaced when `overwrite` is set,
/// otherwise it is an error. Returns the number of data rows written.
pub fn write_table(
    table: &TweetTable,
    out: &Path,
    format: ExportFormat,
    overwrite: bool,
    write_buf: usize,
) -> Result<usize> {
    if out.exists() && !overwrite {
        bail!("{} already exists and overwrite is disabled", out.display());
    }
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }

    let tmp = tmp_path_for(out);
    let res = match format {
        ExportFormat::Csv => write_csv(table, &tmp, write_buf).and_then(|_| replace_file_atomic_backoff(&tmp, out)),
        ExportFormat::Jsonl => write_jsonl(table, &tmp, out, write_buf),
    };
    if res.is_err() {
        let _ = remove_with_backoff(&tmp);
    }
    res?;

    tracing::info!(rows = table.len(), path = %out.display(), ?format, "table saved");
    Ok(table.len())
}

fn write_csv(table: &TweetTable, tmp: &Path, write_buf: usize) -> Result<()> {
    let file = create_with_backoff(tmp).with_context(|| format!("create {}", tmp.display()))?;
    let mut w = csv::Writer::from_writer(BufWriter::with_capacity(write_buf.max(8 * 1024), file));
    w.write_record(&table.header)?;
    for row in table.string_rows() {
        w.write_record(&row)?;
    }
    w.flush().with_context(|| format!("flush {}", tmp.display()))?;
    Ok(())
}

fn write_jsonl(table: &TweetTable, tmp: &Path, out: &Path, write_buf: usize) -> Result<()> {
    let mut w = NdjsonWriter::create(tmp, write_buf)?;
    for obj in table.object_rows() {
        w.write_line(&serde_json::to_string(&obj)?)?;
    }
    w.finish_atomic(out)
}

/// Reload a CSV written by `write_table`: `(header, rows)` as plain strings.
pub fn read_csv_table(path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let file = open_with_backoff(path).with_context(|| format!("open {}", path.display()))?;
    let mut rdr = csv::Reader::from_reader(file);
    let header = rdr.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for rec in rdr.records() {
        let rec = rec.with_context(|| format!("parse {}", path.display()))?;
        rows.push(rec.iter().map(str::to_string).collect());
    }
    Ok((header, rows))
}
