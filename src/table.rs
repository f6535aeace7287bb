//! Row assembly: zip the per-record columns into the fixed output schema.

use crate::extractor::{Column, ExtractedColumns};
use crate::json_utils::render_cell;
use anyhow::{bail, Result};
use serde_json::{Map, Value};

/// Output header, in order.
pub const OUTPUT_COLUMNS: [&str; 16] = [
    "created_at",
    "source",
    "original_text",
    "sentiment",
    "polarity",
    "subjectivity",
    "lang",
    "favorite_count",
    "retweet_count",
    "original_author",
    "followers_count",
    "friends_count",
    "possibly_sensitive",
    "hashtags",
    "user_mentions",
    "place",
];

/// Everything a run derives, ready to be laid out in `OUTPUT_COLUMNS` order.
pub struct TableInputs {
    pub extracted: ExtractedColumns,
    pub polarity: Vec<f64>,
    pub subjectivity: Vec<f64>,
    pub sentiment: Vec<i8>,
}

impl TableInputs {
    /// Columns renamed to their output names, in header order.
    pub fn into_columns(self) -> Vec<Column> {
        let e = self.extracted;
        let floats = |v: Vec<f64>| v.into_iter().map(Value::from).collect::<Vec<_>>();
        vec![
            Column::new("created_at", e.created_at.values),
            Column::new("source", e.source.values),
            Column::new("original_text", e.text.values),
            Column::new("sentiment", self.sentiment.into_iter().map(Value::from).collect()),
            Column::new("polarity", floats(self.polarity)),
            Column::new("subjectivity", floats(self.subjectivity)),
            Column::new("lang", e.lang.values),
            Column::new("favorite_count", e.favorite_count.values),
            Column::new("retweet_count", e.retweet_count.values),
            Column::new("original_author", e.screen_name.values),
            Column::new("followers_count", e.followers_count.values),
            Column::new("friends_count", e.friends_count.values),
            Column::new("possibly_sensitive", e.is_sensitive.values),
            Column::new("hashtags", e.hashtags.values),
            Column::new("user_mentions", e.user_mentions.values),
            Column::new("place", e.location.values),
        ]
    }
}

/// Row-major output table. One row per input record.
#[derive(Clone, Debug, PartialEq)]
pub struct TweetTable {
    pub header: Vec<&'static str>,
    pub rows: Vec<Vec<Value>>,
}

/// Columns whose length differs from `expected`, as `(index, name, len)`.
/// A column with a single value in a multi-record run additionally gets the
/// "empty array" warning: that is how a collapsed projection usually shows up.
pub fn check_column_lengths(columns: &[Column], expected: usize) -> Vec<(usize, &'static str, usize)> {
    let mut bad = Vec::new();
    for (i, c) in columns.iter().enumerate() {
        if c.len() == 1 && expected > 1 {
            tracing::warn!("empty array: {} ({})", i, c.name);
        }
        if c.len() != expected {
            tracing::warn!(column = i, column_name = c.name, len = c.len(), expected, "column length mismatch");
            bad.push((i, c.name, c.len()));
        }
    }
    bad
}

impl TweetTable {
    /// Build rows by index. In `strict` mode any column length mismatch is an
    /// error; otherwise it is logged and only the common prefix is assembled.
    pub fn assemble(columns: Vec<Column>, expected_rows: usize, strict: bool) -> Result<Self> {
        let bad = check_column_lengths(&columns, expected_rows);
        if strict && !bad.is_empty() {
            let names: Vec<String> = bad.iter().map(|(i, n, l)| format!("#{i} {n} (len {l})")).collect();
            bail!("expected {} values per column, got mismatches: {}", expected_rows, names.join(", "));
        }

        let header: Vec<&'static str> = columns.iter().map(|c| c.name).collect();
        let n = columns.iter().map(Column::len).min().unwrap_or(0);
        let mut iters: Vec<_> = columns.into_iter().map(|c| c.values.into_iter()).collect();
        let rows = (0..n)
            .map(|_| iters.iter_mut().filter_map(Iterator::next).collect())
            .collect();
        Ok(Self { header, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| *h == name)
    }

    /// Cell `(row, column name)`, if both exist.
    pub fn get(&self, row: usize, name: &str) -> Option<&Value> {
        let col = self.column_index(name)?;
        self.rows.get(row)?.get(col)
    }

    /// Rows rendered as flat strings, the way they land in the CSV.
    pub fn string_rows(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.rows.iter().map(|r| r.iter().map(render_cell).collect())
    }

    /// Rows as JSON objects keyed by header name.
    pub fn object_rows(&self) -> impl Iterator<Item = Map<String, Value>> + '_ {
        self.rows.iter().map(move |r| {
            self.header.iter().zip(r).map(|(h, v)| (h.to_string(), v.clone())).collect()
        })
    }
}
