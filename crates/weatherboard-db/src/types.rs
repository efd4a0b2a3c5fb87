use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

static WIDGET_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]{24}$").unwrap());

/// Widget identifier: 24 hex characters, stored lower-case
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(String);

impl WidgetId {
    /// Parse an id from a path segment; anything but 24 hex chars is rejected
    pub fn parse(raw: &str) -> Option<Self> {
        WIDGET_ID_RE
            .is_match(raw)
            .then(|| Self(raw.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Widget row returned from SELECT / INSERT ... RETURNING
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct WidgetRow {
    pub id: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Trim a location and reject it if nothing is left
pub fn clean_location(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_id() {
        let id = WidgetId::parse("64c9f0a1b2c3d4e5f6a7b8c9").unwrap();
        assert_eq!(id.as_str(), "64c9f0a1b2c3d4e5f6a7b8c9");
    }

    #[test]
    fn test_parse_normalizes_case() {
        let id = WidgetId::parse("64C9F0A1B2C3D4E5F6A7B8C9").unwrap();
        assert_eq!(id.to_string(), "64c9f0a1b2c3d4e5f6a7b8c9");
    }

    #[test]
    fn test_parse_wrong_length() {
        assert!(WidgetId::parse("64c9f0a1b2c3d4e5f6a7b8c").is_none());
        assert!(WidgetId::parse("64c9f0a1b2c3d4e5f6a7b8c9a").is_none());
        assert!(WidgetId::parse("").is_none());
    }

    #[test]
    fn test_parse_non_hex() {
        assert!(WidgetId::parse("64c9f0a1b2c3d4e5f6a7b8cz").is_none());
        assert!(WidgetId::parse("not-a-valid-widget-id!!!").is_none());
    }

    #[test]
    fn test_widget_id_serializes_as_string() {
        let id = WidgetId::parse("64c9f0a1b2c3d4e5f6a7b8c9").unwrap();
        assert_eq!(
            serde_json::to_value(&id).unwrap(),
            serde_json::json!("64c9f0a1b2c3d4e5f6a7b8c9")
        );
    }

    #[test]
    fn test_clean_location() {
        assert_eq!(clean_location("  Berlin "), Some("Berlin"));
        assert_eq!(clean_location("New York"), Some("New York"));
        assert_eq!(clean_location("   "), None);
        assert_eq!(clean_location(""), None);
    }
}
