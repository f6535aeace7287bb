use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::OffsetDateTime;

/// Parse the classic tweet timestamp, e.g. `Wed Oct 10 20:19:24 +0000 2018`.
pub fn parse_tweet_timestamp(s: &str) -> Option<OffsetDateTime> {
    let fmt = format_description!(
        "[weekday repr:short] [month repr:short] [day] [hour]:[minute]:[second] [offset_hour sign:mandatory][offset_minute] [year]"
    );
    OffsetDateTime::parse(s.trim(), fmt).ok()
}

/// Rewrite a tweet timestamp as RFC 3339. Anything that doesn't parse
/// (already ISO, epoch numbers, garbage) is returned unchanged.
pub fn humanize_created_at(v: &Value) -> Value {
    v.as_str()
        .and_then(parse_tweet_timestamp)
        .and_then(|dt| dt.format(&Rfc3339).ok())
        .map(Value::String)
        .unwrap_or_else(|| v.clone())
}
