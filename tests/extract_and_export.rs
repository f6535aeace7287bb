#[path = "common/mod.rs"]
mod common;

use common::*;
use serde_json::json;
use std::fs;
use tweet_etl::{read_csv_table, ExportFormat, TweetETL, OUTPUT_COLUMNS};

/// Full run over the basic corpus with the built-in lexicon scorer:
/// - one row per input line, header exactly the 16 output columns
/// - nested values are projected, absent ones defaulted
/// - `place` carries the user location
#[test]
fn build_table_projects_and_defaults() {
    let (_dir, input) = make_corpus_basic();
    let table = TweetETL::new().input(&input).build_table().unwrap();

    assert_eq!(table.len(), 3);
    assert_eq!(table.header, OUTPUT_COLUMNS.to_vec());

    assert_eq!(table.get(0, "original_author"), Some(&json!("ann")));
    assert_eq!(table.get(0, "followers_count"), Some(&json!(150)));
    assert_eq!(table.get(0, "friends_count"), Some(&json!(150)));
    assert_eq!(table.get(0, "favorite_count"), Some(&json!(12)));
    assert_eq!(table.get(0, "retweet_count"), Some(&json!(4)));
    assert_eq!(table.get(0, "possibly_sensitive"), Some(&json!(false)));
    assert_eq!(table.get(0, "place"), Some(&json!("Nairobi")));
    assert_eq!(table.get(0, "sentiment"), Some(&json!(1)));

    // t2 has no user/entities/retweeted_status at all
    for col in ["original_author", "followers_count", "friends_count", "place", "hashtags", "user_mentions", "possibly_sensitive"] {
        assert_eq!(table.get(1, col), Some(&json!("")), "column {col}");
    }
    assert_eq!(table.get(1, "favorite_count"), Some(&json!(0)));
    assert_eq!(table.get(1, "retweet_count"), Some(&json!(0)));
    assert_eq!(table.get(1, "sentiment"), Some(&json!(0)));

    // t3 has a partial user object
    assert_eq!(table.get(2, "original_author"), Some(&json!("bo")));
    assert_eq!(table.get(2, "followers_count"), Some(&json!("")));
    assert_eq!(table.get(2, "sentiment"), Some(&json!(-1)));
}

/// Persist to CSV then reload: same row count and same `original_text`, in order.
#[test]
fn csv_round_trip_preserves_rows_and_text() {
    let (dir, input) = make_corpus_basic();
    let out = dir.path().join("data").join("processed_tweet_data.csv");

    let etl = TweetETL::new().input(&input).output(&out);
    let table = etl.run(true).unwrap();
    assert!(out.exists());

    let (header, rows) = read_csv_table(&out).unwrap();
    assert_eq!(header, OUTPUT_COLUMNS.iter().map(|s| s.to_string()).collect::<Vec<_>>());
    assert_eq!(rows.len(), table.len());

    let text_idx = table.column_index("original_text").unwrap();
    let reloaded: Vec<&str> = rows.iter().map(|r| r[text_idx].as_str()).collect();
    let in_memory: Vec<&str> = table.rows.iter().map(|r| r[text_idx].as_str().unwrap()).collect();
    assert_eq!(reloaded, in_memory);

    let hashtags_idx = table.column_index("hashtags").unwrap();
    let tags: serde_json::Value = serde_json::from_str(&rows[0][hashtags_idx]).unwrap();
    assert_eq!(tags[0]["text"], "economy");
}

/// Saving twice overwrites by default; with overwrite disabled the second save fails.
#[test]
fn overwrite_policy_is_honoured() {
    let (dir, input) = make_corpus_basic();
    let out = dir.path().join("out.csv");
    fs::write(&out, "stale").unwrap();

    let n = TweetETL::new().input(&input).extract_to_csv(&out).unwrap();
    assert_eq!(n, 3);
    assert!(fs::read_to_string(&out).unwrap().starts_with("created_at,source,original_text"));

    let err = TweetETL::new().input(&input).overwrite(false).extract_to_csv(&out);
    assert!(err.is_err());
}

/// JSONL export writes one keyed object per row.
#[test]
fn jsonl_export() {
    let (dir, input) = make_corpus_basic();
    let out = dir.path().join("rows.jsonl");

    TweetETL::new()
        .input(&input)
        .format(ExportFormat::Jsonl)
        .scorer(fixed_scorer(0.0, 0.0))
        .export(&out)
        .unwrap();

    let lines: Vec<serde_json::Value> = fs::read_to_string(&out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[2]["original_author"], "bo");
    assert_eq!(lines[1]["sentiment"], -1);
}

/// `.zst` input is decoded transparently and gives the same table as plain NDJSON.
#[test]
fn zst_input_matches_plain() {
    let (dir, input) = make_corpus_basic();
    let packed = dir.path().join("data").join("tweets.json.zst");
    write_ndjson_zst(&packed, &corpus_records());

    let plain = TweetETL::new().input(&input).build_table().unwrap();
    let zst = TweetETL::new().input(&packed).build_table().unwrap();
    assert_eq!(plain, zst);
}

/// RFC 3339 timestamps on request; untouched otherwise.
#[test]
fn human_readable_timestamps() {
    let (_dir, input) = make_corpus_basic();
    let raw = TweetETL::new().input(&input).build_table().unwrap();
    assert_eq!(raw.get(0, "created_at"), Some(&json!("Fri Apr 22 22:20:18 +0000 2022")));

    let human = TweetETL::new().input(&input).timestamps_human_readable(true).build_table().unwrap();
    assert_eq!(human.get(0, "created_at"), Some(&json!("2022-04-22T22:20:18Z")));
}
