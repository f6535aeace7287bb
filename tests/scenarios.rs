#[path = "common/mod.rs"]
mod common;

use common::*;
use serde_json::json;
use std::fs;
use tweet_etl::{read_records, TweetETL};

/// A minimal tweet scored at (0.8, 0.6) becomes a positive row with zero
/// engagement counts and an empty follower count.
#[test]
fn great_news_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("one.json");
    fs::write(&input, r#"{"text":"Great news!","created_at":"t1","source":"web","lang":"en"}"#).unwrap();

    let table = TweetETL::new().input(&input).scorer(fixed_scorer(0.8, 0.6)).build_table().unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(table.get(0, "sentiment"), Some(&json!(1)));
    assert_eq!(table.get(0, "polarity"), Some(&json!(0.8)));
    assert_eq!(table.get(0, "subjectivity"), Some(&json!(0.6)));
    assert_eq!(table.get(0, "favorite_count"), Some(&json!(0)));
    assert_eq!(table.get(0, "retweet_count"), Some(&json!(0)));
    assert_eq!(table.get(0, "followers_count"), Some(&json!("")));
    assert_eq!(table.get(0, "original_text"), Some(&json!("Great news!")));
}

/// Two bare tweets: exactly two rows, every optional column defaulted, no error.
/// Also a regression guard for the single-value-column diagnostic, which must
/// not fire (or fail) when every column has two values.
#[test]
fn two_bare_records() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("two.json");
    write_ndjson(
        &input,
        &[
            json!({"text": "a", "created_at": "t1", "source": "web", "lang": "en"}),
            json!({"text": "b", "created_at": "t2", "source": "web", "lang": "en"}),
        ],
    );

    let table = TweetETL::new().input(&input).scorer(fixed_scorer(0.0, 0.0)).build_table().unwrap();
    assert_eq!(table.len(), 2);
    for row in 0..2 {
        for col in ["original_author", "followers_count", "friends_count", "possibly_sensitive", "hashtags", "user_mentions", "place"] {
            assert_eq!(table.get(row, col), Some(&json!("")), "row {row} column {col}");
        }
        assert_eq!(table.get(row, "favorite_count"), Some(&json!(0)));
        assert_eq!(table.get(row, "retweet_count"), Some(&json!(0)));
        assert_eq!(table.get(row, "sentiment"), Some(&json!(-1)));
    }
}

/// Row count always equals the loaded record count.
#[test]
fn row_count_matches_record_count() {
    let (_dir, input) = make_corpus_basic();
    let (n, records) = read_records(&input).unwrap();
    let table = TweetETL::new().build_table_from(&records).unwrap();
    assert_eq!(n, 3);
    assert_eq!(table.len(), n);
}

/// Polarity sign decides the label: > 0 → 1, < 0 → 0, 0 → -1.
#[test]
fn label_follows_polarity_sign() {
    let records = vec![json!({"text": "x", "created_at": "t", "source": "s", "lang": "en"})];
    for (p, label) in [(0.3, 1), (-0.3, 0), (0.0, -1)] {
        let table = TweetETL::new().scorer(fixed_scorer(p, 0.5)).build_table_from(&records).unwrap();
        assert_eq!(table.get(0, "sentiment"), Some(&json!(label)), "polarity {p}");
    }
}

/// Malformed lines abort by default and are skipped on request.
#[test]
fn malformed_line_policy() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.json");
    fs::write(
        &input,
        "{\"text\":\"a\",\"created_at\":\"t\",\"source\":\"s\",\"lang\":\"en\"}\n{oops\n",
    )
    .unwrap();

    assert!(TweetETL::new().input(&input).build_table().is_err());

    let table = TweetETL::new().input(&input).skip_malformed(true).build_table().unwrap();
    assert_eq!(table.len(), 1);
}

/// A record without `text` is a hard failure, not a defaulted cell.
#[test]
fn missing_required_field_fails_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("no_text.json");
    write_ndjson(&input, &[json!({"created_at": "t", "source": "s", "lang": "en"})]);

    let err = TweetETL::new().input(&input).build_table().unwrap_err();
    assert!(format!("{err:#}").contains("missing required field `text`"), "{err:#}");
}

/// `friends_count` mirrors `user.followers_count`; the record's own
/// `user.friends_count` never reaches the table.
#[test]
fn friends_count_mirrors_followers_count() {
    let rec = json!({
        "text": "steady", "created_at": "t", "source": "s", "lang": "en",
        "user": {"screen_name": "cy", "followers_count": 10, "friends_count": 3}
    });
    let table = TweetETL::new().build_table_from(&[rec]).unwrap();
    assert_eq!(table.get(0, "followers_count"), Some(&json!(10)));
    assert_eq!(table.get(0, "friends_count"), Some(&json!(10)));
}
