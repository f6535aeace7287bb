use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::thread::sleep;
use std::time::Duration;

static INIT_ONCE: std::sync::Once = std::sync::Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG` (default `info`).
/// Safe to call from every entry point; only the first call does anything.
pub fn init_tracing_once() {
    INIT_ONCE.call_once(|| {
        let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let _ = tracing_subscriber::fmt().with_env_filter(env_filter).try_init();
    });
}

// -------- file ops with backoff (AV scanners, network shares, sync clients) --------

const DEFAULT_TRIES: usize = 16;
const DEFAULT_DELAY_MS: u64 = 50;

/// Transient errors worth retrying. Mostly Windows sharing/lock violations,
/// which show up when a spreadsheet or sync client holds the output CSV.
fn is_retriable_io_error(e: &io::Error) -> bool {
    //   5 = access denied, 32 = sharing violation, 33 = lock violation,
    //  21 = device not ready, 1224 = user-mapped section open
    matches!(e.raw_os_error(), Some(5) | Some(21) | Some(32) | Some(33) | Some(1224))
}

/// Run `op` until it succeeds, fails with a non-retriable error, or `tries` runs out.
/// Delay grows linearly with the attempt number.
fn with_backoff<T>(tries: usize, delay_ms: u64, mut op: impl FnMut() -> io::Result<T>) -> io::Result<T> {
    let mut last_err: Option<io::Error> = None;
    for i in 0..tries.max(1) {
        match op() {
            Ok(v) => return Ok(v),
            Err(e) if is_retriable_io_error(&e) => {
                last_err = Some(e);
                sleep(Duration::from_millis(delay_ms.saturating_mul((i + 1) as u64)));
            }
            Err(e) => return Err(e),
        }
    }
    Err(last_err.unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "retries exhausted")))
}

/// Open a file for reading, retrying transient failures.
pub fn open_with_backoff(path: &Path) -> io::Result<File> {
    with_backoff(DEFAULT_TRIES, DEFAULT_DELAY_MS, || File::open(path))
}

/// Create (truncate) a file, retrying transient failures.
pub fn create_with_backoff(path: &Path) -> io::Result<File> {
    with_backoff(DEFAULT_TRIES, DEFAULT_DELAY_MS, || File::create(path))
}

/// Remove a file, retrying transient failures. Missing files are fine.
pub fn remove_with_backoff(path: &Path) -> Result<()> {
    match with_backoff(DEFAULT_TRIES, DEFAULT_DELAY_MS, || fs::remove_file(path)) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("remove {}", path.display())),
    }
}

/// Move `tmp` over `dest`. The rename replaces an existing `dest` in one step;
/// when it is refused (e.g. `tmp` and `dest` live on different volumes) the
/// fallback copies over `dest` in place, which is not atomic. `dest` is never
/// removed up front, so a failed replace leaves the previous file readable.
pub fn replace_file_atomic_backoff(tmp: &Path, dest: &Path) -> Result<()> {
    if with_backoff(20, DEFAULT_DELAY_MS, || fs::rename(tmp, dest)).is_ok() {
        return Ok(());
    }
    with_backoff(20, DEFAULT_DELAY_MS, || fs::copy(tmp, dest))
        .with_context(|| format!("copy {} -> {}", tmp.display(), dest.display()))?;
    remove_with_backoff(tmp)
}
