// Lenient timestamp handling for backend payloads.
// The chat backend emits RFC 3339 in most places but plain "YYYY-MM-DD HH:MM:SS"
// in older rows; anything else is treated as unknown instead of failing the whole payload.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

const PLAIN_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub(crate) fn parse(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, PLAIN_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

pub(crate) fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse))
}
