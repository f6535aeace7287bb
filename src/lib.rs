//! Flatten a newline-delimited JSON corpus of tweets into a fixed-schema table
//! with derived sentiment features, and persist it as CSV or JSONL.

mod config;
mod date;
mod export;
mod extractor;
mod json_utils;
mod loader;
mod ndjson;
mod pipeline;
mod progress;
mod sentiment;
mod table;
mod util;

pub use crate::config::{ExtractOptions, DEFAULT_INPUT, DEFAULT_OUTPUT};
pub use crate::pipeline::TweetETL;
pub use crate::export::{read_csv_table, write_table, ExportFormat};

// Loader and NDJSON helpers.
pub use crate::loader::{read_records, read_records_with, LoadOptions};
pub use crate::ndjson::{NdjsonReader, NdjsonWriter};

// Column projections.
pub use crate::extractor::{extract_all, extract_column, Column, ColumnSpec, ExtractedColumns, FieldDefault, FieldSpec};
pub use crate::json_utils::{lookup_path, render_cell};
pub use crate::date::humanize_created_at;

// Sentiment.
pub use crate::sentiment::{
    score_column, sentiment_label, sentiment_labels, LexiconScorer, Sentiment, SentimentLabel, SentimentScorer,
};

// Assembly.
pub use crate::table::{check_column_lengths, TableInputs, TweetTable, OUTPUT_COLUMNS};

pub use crate::util::init_tracing_once;

/// Column specs for the projected fields, for callers building their own tables.
pub mod columns {
    pub use crate::extractor::{
        CREATED_AT, FAVORITE_COUNT, FOLLOWERS_COUNT, FRIENDS_COUNT, HASHTAGS, IS_SENSITIVE, LANG, LOCATION,
        RETWEET_COUNT, SCREEN_NAME, SOURCE, TEXT, USER_MENTIONS,
    };
}
