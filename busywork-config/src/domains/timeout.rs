//! Timeouts written as `30`, `30s`, `500ms` or `2m`

use serde::{Deserialize, Deserializer, Serializer};
use std::time::Duration;

/// Parse a timeout. A bare number is seconds.
pub fn parse_timeout(value: &str) -> Result<Duration, String> {
    let value = value.trim();
    let (digits, unit) = match value.find(|c: char| !c.is_ascii_digit()) {
        Some(split) => value.split_at(split),
        None => (value, "s"),
    };

    let amount: u64 = digits
        .parse()
        .map_err(|_| format!("expected a number with an optional s, ms or m suffix, got {:?}", value))?;

    match unit.trim() {
        "s" => Ok(Duration::from_secs(amount)),
        "ms" => Ok(Duration::from_millis(amount)),
        "m" => amount
            .checked_mul(60)
            .map(Duration::from_secs)
            .ok_or_else(|| format!("timeout {:?} is too large", value)),
        other => Err(format!("unknown timeout unit {:?}", other)),
    }
}

/// Serde adapter: whole seconds are written as a number, anything finer as
/// milliseconds (`"1500ms"`)
pub mod serde_timeout {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Seconds(u64),
        Text(String),
    }

    pub fn serialize<S>(timeout: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if timeout.subsec_nanos() == 0 {
            serializer.serialize_u64(timeout.as_secs())
        } else {
            serializer.serialize_str(&format!("{}ms", timeout.as_millis()))
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(deserializer)? {
            Raw::Seconds(seconds) => Ok(Duration::from_secs(seconds)),
            Raw::Text(text) => parse_timeout(&text).map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timeout_units() {
        assert_eq!(parse_timeout("30"), Ok(Duration::from_secs(30)));
        assert_eq!(parse_timeout("30s"), Ok(Duration::from_secs(30)));
        assert_eq!(parse_timeout(" 500ms "), Ok(Duration::from_millis(500)));
        assert_eq!(parse_timeout("2m"), Ok(Duration::from_secs(120)));
    }

    #[test]
    fn test_parse_timeout_rejects_garbage() {
        assert!(parse_timeout("").is_err());
        assert!(parse_timeout("soon").is_err());
        assert!(parse_timeout("10h").is_err());
        assert!(parse_timeout("-5s").is_err());
        assert!(parse_timeout(&format!("{}m", u64::MAX)).is_err());
    }
}
