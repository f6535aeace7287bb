use crate::config::ExtractOptions;
use crate::export::{write_table, ExportFormat};
use crate::extractor::extract_all;
use crate::loader::read_records_with;
use crate::progress::make_count_progress;
use crate::sentiment::{score_column, sentiment_labels, LexiconScorer, SentimentScorer};
use crate::table::{TableInputs, TweetTable};
use crate::util::init_tracing_once;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

/// Load → extract → score → assemble → (optionally) persist.
#[derive(Clone)]
pub struct TweetETL {
    pub(crate) opts: ExtractOptions,
    scorer: Arc<dyn SentimentScorer + Send + Sync>,
}

impl Default for TweetETL {
    fn default() -> Self {
        Self::new()
    }
}

impl TweetETL {
    pub fn new() -> Self {
        Self { opts: ExtractOptions::default(), scorer: Arc::new(LexiconScorer::new()) }
    }

    pub fn with_options(opts: ExtractOptions) -> Self {
        Self { opts, ..Self::new() }
    }

    // -------- Builder methods --------
    pub fn input(mut self, path: impl AsRef<Path>) -> Self { self.opts = self.opts.with_input(path); self }
    pub fn output(mut self, path: impl AsRef<Path>) -> Self { self.opts = self.opts.with_output(path); self }
    pub fn format(mut self, format: ExportFormat) -> Self { self.opts = self.opts.with_format(format); self }
    pub fn overwrite(mut self, yes: bool) -> Self { self.opts = self.opts.with_overwrite(yes); self }
    pub fn skip_malformed(mut self, yes: bool) -> Self { self.opts = self.opts.with_skip_malformed(yes); self }
    pub fn strict_columns(mut self, yes: bool) -> Self { self.opts = self.opts.with_strict_columns(yes); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }
    pub fn progress_label(mut self, label: impl Into<String>) -> Self { self.opts = self.opts.with_progress_label(label); self }
    pub fn io_read_buffer(mut self, bytes: usize) -> Self { self.opts = self.opts.with_io_read_buffer(bytes); self }
    pub fn io_write_buffer(mut self, bytes: usize) -> Self { self.opts = self.opts.with_io_write_buffer(bytes); self }
    pub fn timestamps_human_readable(mut self, yes: bool) -> Self { self.opts = self.opts.with_human_timestamps(yes); self }

    /// Swap the sentiment backend.
    pub fn scorer(mut self, scorer: impl SentimentScorer + Send + Sync + 'static) -> Self {
        self.scorer = Arc::new(scorer);
        self
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.opts
    }

    // -------- Operations --------

    /// Read the configured input. Returns `(count, records)` in line order.
    pub fn load(&self) -> Result<(usize, Vec<Value>)> {
        init_tracing_once();
        let (n, records) = read_records_with(&self.opts.input, &self.opts.load_options())
            .with_context(|| format!("loading {}", self.opts.input.display()))?;
        tracing::info!("Loaded {} records from {}", n, self.opts.input.display());
        Ok((n, records))
    }

    /// Load the input and build the output table.
    pub fn build_table(&self) -> Result<TweetTable> {
        let (_, records) = self.load()?;
        self.build_table_from(&records)
    }

    /// Build the output table from records already in memory.
    pub fn build_table_from(&self, records: &[Value]) -> Result<TweetTable> {
        init_tracing_once();
        let extracted = extract_all(records, self.opts.human_readable_timestamps)?;

        let pb = if self.opts.progress {
            let label = self.opts.progress_label.as_deref().unwrap_or("Scoring sentiment");
            Some(make_count_progress(records.len() as u64, label))
        } else {
            None
        };
        let (polarity, subjectivity) = score_column(self.scorer.as_ref(), &extracted.text, pb.as_ref());
        if let Some(pb) = pb { pb.finish_with_message("done"); }
        let sentiment = sentiment_labels(&polarity);

        let columns = TableInputs { extracted, polarity, subjectivity, sentiment }.into_columns();
        TweetTable::assemble(columns, records.len(), self.opts.strict_columns)
    }

    /// Build the table and persist it to the configured output. Returns it for further use.
    pub fn run(&self, save: bool) -> Result<TweetTable> {
        let table = self.build_table()?;
        if save {
            self.save(&table, &self.opts.output)?;
        }
        Ok(table)
    }

    /// Build the table and write it as CSV to `out_path`. Returns the row count.
    pub fn extract_to_csv(self, out_path: &Path) -> Result<usize> {
        self.format(ExportFormat::Csv).export(out_path)
    }

    /// Build the table and write it to `out_path` in the configured format.
    pub fn export(self, out_path: &Path) -> Result<usize> {
        let table = self.build_table()?;
        self.save(&table, out_path)
    }

    /// Persist an already built table using the configured format/overwrite policy.
    pub fn save(&self, table: &TweetTable, out_path: &Path) -> Result<usize> {
        write_table(table, out_path, self.opts.format, self.opts.overwrite, self.opts.write_buffer_bytes)
            .with_context(|| format!("saving {}", out_path.display()))
    }
}
