use crate::export::ExportFormat;
use crate::loader::LoadOptions;
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT: &str = "./data/Economic_Twitter_Data.json";
pub const DEFAULT_OUTPUT: &str = "./data/processed_tweet_data.csv";

/// User-facing options with sensible defaults and builder chaining.
#[derive(Clone, Debug)]
pub struct ExtractOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: ExportFormat,
    pub overwrite: bool,          // replace an existing output file
    pub skip_malformed: bool,     // false: a bad JSON line aborts the run
    pub strict_columns: bool,     // false: column length mismatches only warn
    pub progress: bool,           // show a progress bar while scoring
    pub progress_label: Option<String>,

    // IO tuning
    pub read_buffer_bytes: usize,
    pub write_buffer_bytes: usize,

    // output formatting
    pub human_readable_timestamps: bool, // created_at as RFC 3339
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            format: ExportFormat::Csv,
            overwrite: true,
            skip_malformed: false,
            strict_columns: true,
            progress: false,
            progress_label: None,
            read_buffer_bytes: 256 * 1024,
            write_buffer_bytes: 256 * 1024,
            human_readable_timestamps: false,
        }
    }
}

impl ExtractOptions {
    pub fn with_input(mut self, path: impl AsRef<Path>) -> Self {
        self.input = path.as_ref().to_path_buf();
        self
    }
    pub fn with_output(mut self, path: impl AsRef<Path>) -> Self {
        self.output = path.as_ref().to_path_buf();
        self
    }
    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }
    pub fn with_overwrite(mut self, yes: bool) -> Self {
        self.overwrite = yes;
        self
    }
    pub fn with_skip_malformed(mut self, yes: bool) -> Self {
        self.skip_malformed = yes;
        self
    }
    pub fn with_strict_columns(mut self, yes: bool) -> Self {
        self.strict_columns = yes;
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
    pub fn with_progress_label(mut self, label: impl Into<String>) -> Self {
        self.progress_label = Some(label.into());
        self
    }
    pub fn with_io_read_buffer(mut self, bytes: usize) -> Self {
        self.read_buffer_bytes = bytes.max(8 * 1024);
        self
    }
    pub fn with_io_write_buffer(mut self, bytes: usize) -> Self {
        self.write_buffer_bytes = bytes.max(8 * 1024);
        self
    }
    pub fn with_human_timestamps(mut self, yes: bool) -> Self {
        self.human_readable_timestamps = yes;
        self
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions { skip_malformed: self.skip_malformed, read_buffer_bytes: self.read_buffer_bytes }
    }
}
