use axum::{extract::FromRequestParts, http::request::Parts};
use std::collections::HashMap;
use std::convert::Infallible;

/// Query string parameters that never reject a request.
///
/// Malformed or missing values fall back to the caller's default. When a key
/// is repeated the first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: HashMap<String, String>,
}

impl QueryParams {
    /// Parse a raw query string (without the leading `?`)
    pub fn from_query(query: Option<&str>) -> Self {
        let pairs: Vec<(String, String)> = query
            .and_then(|q| serde_urlencoded::from_str(q).ok())
            .unwrap_or_default();

        let mut params = HashMap::with_capacity(pairs.len());
        for (key, value) in pairs {
            params.entry(key).or_insert(value);
        }

        Self { params }
    }

    /// Raw value of a parameter
    pub fn text(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Integer value of a parameter, or `default` when absent or unparsable
    pub fn int_or(&self, key: &str, default: i64) -> i64 {
        self.text(key)
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Boolean flag: only a case-insensitive `true` is set
    pub fn flag(&self, key: &str) -> bool {
        self.text(key)
            .is_some_and(|value| value.trim().eq_ignore_ascii_case("true"))
    }
}

impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_query(parts.uri.query()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_defaults() {
        let query = QueryParams::from_query(Some("iterations=25&bites=abc&empty="));
        assert_eq!(query.int_or("iterations", 10), 25);
        assert_eq!(query.int_or("bites", 10), 10);
        assert_eq!(query.int_or("empty", 10), 10);
        assert_eq!(query.int_or("missing", 10), 10);
        assert_eq!(QueryParams::from_query(Some("iterations=-3")).int_or("iterations", 10), -3);
    }

    #[test]
    fn test_flag_is_only_true() {
        assert!(QueryParams::from_query(Some("db=true")).flag("db"));
        assert!(QueryParams::from_query(Some("db=TRUE")).flag("db"));
        assert!(!QueryParams::from_query(Some("db=1")).flag("db"));
        assert!(!QueryParams::from_query(Some("db=yes")).flag("db"));
        assert!(!QueryParams::from_query(Some("db")).flag("db"));
        assert!(!QueryParams::from_query(None).flag("db"));
    }

    #[test]
    fn test_text_is_decoded_and_first_wins() {
        let query = QueryParams::from_query(Some("desc=hello%20world&desc=second&note=a+b"));
        assert_eq!(query.text("desc"), Some("hello world"));
        assert_eq!(query.text("note"), Some("a b"));
        assert_eq!(QueryParams::from_query(None).text("desc"), None);
    }
}
