//! Per-column field projections over the loaded record collection.
//!
//! Every column is described by a `ColumnSpec` (path + what to do when the path
//! is missing) and produced by the same safe lookup, so each column always has
//! exactly one value per record.

use crate::date::humanize_created_at;
use crate::json_utils::lookup_path;
use anyhow::{anyhow, Result};
use serde_json::Value;

/// Value substituted when an optional path is absent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldDefault {
    EmptyString,
    Zero,
}

impl FieldDefault {
    pub fn to_value(self) -> Value {
        match self {
            FieldDefault::EmptyString => Value::String(String::new()),
            FieldDefault::Zero => Value::from(0),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum FieldSpec {
    /// Must be present on every record; absence aborts extraction.
    Required(&'static [&'static str]),
    Optional(&'static [&'static str], FieldDefault),
}

impl FieldSpec {
    pub fn path(&self) -> &'static [&'static str] {
        match self {
            FieldSpec::Required(p) | FieldSpec::Optional(p, _) => p,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub field: FieldSpec,
}

pub const TEXT: ColumnSpec = ColumnSpec { name: "text", field: FieldSpec::Required(&["text"]) };
pub const CREATED_AT: ColumnSpec = ColumnSpec { name: "created_at", field: FieldSpec::Required(&["created_at"]) };
pub const SOURCE: ColumnSpec = ColumnSpec { name: "source", field: FieldSpec::Required(&["source"]) };
pub const LANG: ColumnSpec = ColumnSpec { name: "lang", field: FieldSpec::Required(&["lang"]) };
pub const SCREEN_NAME: ColumnSpec = ColumnSpec {
    name: "screen_name",
    field: FieldSpec::Optional(&["user", "screen_name"], FieldDefault::EmptyString),
};
pub const FOLLOWERS_COUNT: ColumnSpec = ColumnSpec {
    name: "followers_count",
    field: FieldSpec::Optional(&["user", "followers_count"], FieldDefault::EmptyString),
};
pub const FRIENDS_COUNT: ColumnSpec = ColumnSpec {
    name: "friends_count",
    // Mirrors followers_count; the source schema's friends_count is not read.
    field: FieldSpec::Optional(&["user", "followers_count"], FieldDefault::EmptyString),
};
pub const IS_SENSITIVE: ColumnSpec = ColumnSpec {
    name: "is_sensitive",
    field: FieldSpec::Optional(&["possibly_sensitive"], FieldDefault::EmptyString),
};
pub const FAVORITE_COUNT: ColumnSpec = ColumnSpec {
    name: "favorite_count",
    field: FieldSpec::Optional(&["retweeted_status", "favorite_count"], FieldDefault::Zero),
};
pub const RETWEET_COUNT: ColumnSpec = ColumnSpec {
    name: "retweet_count",
    field: FieldSpec::Optional(&["retweeted_status", "retweet_count"], FieldDefault::Zero),
};
pub const HASHTAGS: ColumnSpec = ColumnSpec {
    name: "hashtags",
    field: FieldSpec::Optional(&["entities", "hashtags"], FieldDefault::EmptyString),
};
pub const USER_MENTIONS: ColumnSpec = ColumnSpec {
    name: "user_mentions",
    field: FieldSpec::Optional(&["entities", "user_mentions"], FieldDefault::EmptyString),
};
pub const LOCATION: ColumnSpec = ColumnSpec {
    name: "location",
    field: FieldSpec::Optional(&["user", "location"], FieldDefault::EmptyString),
};

/// One value per record, index-aligned with the record collection.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub name: &'static str,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: &'static str, values: Vec<Value>) -> Self {
        Self { name, values }
    }
    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Project `spec` over every record.
pub fn extract_column(records: &[Value], spec: ColumnSpec) -> Result<Column> {
    let values = records
        .iter()
        .enumerate()
        .map(|(i, rec)| match (lookup_path(rec, spec.field.path()), spec.field) {
            (Some(v), _) => Ok(v.clone()),
            (None, FieldSpec::Optional(_, default)) => Ok(default.to_value()),
            (None, FieldSpec::Required(path)) => {
                Err(anyhow!("record {}: missing required field `{}`", i, path.join(".")))
            }
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Column::new(spec.name, values))
}

/// All projected (non-derived) columns of a run.
#[derive(Clone, Debug)]
pub struct ExtractedColumns {
    pub created_at: Column,
    pub source: Column,
    pub text: Column,
    pub lang: Column,
    pub favorite_count: Column,
    pub retweet_count: Column,
    pub screen_name: Column,
    pub followers_count: Column,
    pub friends_count: Column,
    pub is_sensitive: Column,
    pub hashtags: Column,
    pub user_mentions: Column,
    pub location: Column,
}

/// Run every projection. `human_timestamps` rewrites `created_at` as RFC 3339.
pub fn extract_all(records: &[Value], human_timestamps: bool) -> Result<ExtractedColumns> {
    let mut created_at = extract_column(records, CREATED_AT)?;
    if human_timestamps {
        created_at.values = created_at.values.iter().map(humanize_created_at).collect();
    }
    Ok(ExtractedColumns {
        created_at,
        source: extract_column(records, SOURCE)?,
        text: extract_column(records, TEXT)?,
        lang: extract_column(records, LANG)?,
        favorite_count: extract_column(records, FAVORITE_COUNT)?,
        retweet_count: extract_column(records, RETWEET_COUNT)?,
        screen_name: extract_column(records, SCREEN_NAME)?,
        followers_count: extract_column(records, FOLLOWERS_COUNT)?,
        friends_count: extract_column(records, FRIENDS_COUNT)?,
        is_sensitive: extract_column(records, IS_SENSITIVE)?,
        hashtags: extract_column(records, HASHTAGS)?,
        user_mentions: extract_column(records, USER_MENTIONS)?,
        location: extract_column(records, LOCATION)?,
    })
}
