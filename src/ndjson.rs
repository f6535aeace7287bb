use crate::util::{create_with_backoff, open_with_backoff, replace_file_atomic_backoff};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use zstd::stream::read::Decoder;

/// Buffered NDJSON reader. Files ending in `.zst` are decoded on the fly,
/// anything else is read as plain UTF-8.
pub struct NdjsonReader {
    rdr: Box<dyn BufRead>,
    line_no: usize,
}

impl NdjsonReader {
    pub fn open(path: &Path, buf_bytes: usize) -> Result<Self> {
        let cap = buf_bytes.max(8 * 1024);
        let f = open_with_backoff(path).with_context(|| format!("open {}", path.display()))?;
        let rdr: Box<dyn BufRead> = if is_zst(path) {
            let mut dec = Decoder::new(f).with_context(|| format!("zstd header {}", path.display()))?;
            dec.window_log_max(31)?;
            Box::new(BufReader::with_capacity(cap, dec))
        } else {
            Box::new(BufReader::with_capacity(cap, f))
        };
        Ok(Self { rdr, line_no: 0 })
    }

    /// Read the next line into `buf`. Returns the number of bytes read (0 on EOF).
    /// Strips trailing `\r?\n`.
    pub fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        buf.clear();
        let n = self.rdr.read_line(buf)?;
        if n == 0 { return Ok(0); }
        self.line_no += 1;
        if buf.ends_with('\n') {
            buf.pop();
            if buf.ends_with('\r') { buf.pop(); }
        }
        Ok(n)
    }

    /// 1-based number of the line last returned by `read_line`.
    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

fn is_zst(path: &Path) -> bool {
    path.extension().map_or(false, |e| e.eq_ignore_ascii_case("zst"))
}

/// Buffered NDJSON writer. You are responsible for the line contents;
/// `write_line` appends the `\n`.
pub struct NdjsonWriter {
    path: PathBuf,
    w: Option<BufWriter<File>>,
}

impl NdjsonWriter {
    pub fn create(path: &Path, buf_bytes: usize) -> Result<Self> {
        let f = create_with_backoff(path).with_context(|| format!("create {}", path.display()))?;
        Ok(Self { path: path.to_path_buf(), w: Some(BufWriter::with_capacity(buf_bytes.max(8 * 1024), f)) })
    }

    #[inline]
    pub fn write_line(&mut self, s: &str) -> io::Result<()> {
        if let Some(w) = &mut self.w {
            w.write_all(s.as_bytes())?;
            w.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Flushes and promotes the temp file to `final_path`.
    pub fn finish_atomic(mut self, final_path: &Path) -> Result<()> {
        if let Some(mut w) = self.w.take() {
            w.flush().with_context(|| format!("flush {}", self.path.display()))?;
        }
        replace_file_atomic_backoff(&self.path, final_path)
    }
}
