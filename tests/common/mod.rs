#![allow(dead_code)]

use serde_json::{json, Value};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tweet_etl::Sentiment;

/// Write `records` as NDJSON (one compact object per line).
pub fn write_ndjson(path: &Path, records: &[Value]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut f = File::create(path).unwrap();
    for r in records {
        writeln!(&mut f, "{}", r).unwrap();
    }
}

/// Same as `write_ndjson`, zstd-compressed.
pub fn write_ndjson_zst(path: &Path, records: &[Value]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let f = File::create(path).unwrap();
    let mut enc = zstd::stream::write::Encoder::new(f, 3).unwrap();
    for r in records {
        writeln!(&mut enc, "{}", r).unwrap();
    }
    enc.finish().unwrap();
}

/// Scorer that ignores the text and always answers `(polarity, subjectivity)`.
pub fn fixed_scorer(polarity: f64, subjectivity: f64) -> impl Fn(&str) -> Sentiment + Send + Sync + 'static {
    move |_: &str| Sentiment::new(polarity, subjectivity)
}

/// Small corpus:
/// - t1: full tweet by "ann" that is a retweet (favorite 12, retweet 4), sensitive=false,
///       one hashtag, one mention, located in Nairobi
/// - t2: bare tweet, no `user`, `entities`, `retweeted_status` or `possibly_sensitive`
/// - t3: `user` present but only `screen_name`; text contains a comma and quotes
pub fn make_corpus_basic() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("data").join("tweets.json");
    write_ndjson(&input, &corpus_records());
    (dir, input)
}

pub fn corpus_records() -> Vec<Value> {
    vec![
        json!({
            "created_at": "Fri Apr 22 22:20:18 +0000 2022",
            "source": "<a href=\"http://twitter.com/download/android\">Twitter for Android</a>",
            "text": "RT @econ: Great growth numbers this quarter",
            "lang": "en",
            "possibly_sensitive": false,
            "user": {"screen_name": "ann", "followers_count": 150, "friends_count": 80, "location": "Nairobi"},
            "retweeted_status": {"favorite_count": 12, "retweet_count": 4},
            "entities": {
                "hashtags": [{"text": "economy", "indices": [0, 8]}],
                "user_mentions": [{"screen_name": "econ", "id": 7}]
            }
        }),
        json!({
            "created_at": "Fri Apr 22 22:21:00 +0000 2022",
            "source": "web",
            "text": "Inflation is a terrible crisis",
            "lang": "en"
        }),
        json!({
            "created_at": "Fri Apr 22 22:22:00 +0000 2022",
            "source": "web",
            "text": "Markets, \"as usual\", closed on Friday",
            "lang": "fr",
            "user": {"screen_name": "bo"}
        }),
    ]
}
