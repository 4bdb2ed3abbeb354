pub mod application;
pub mod auth;
pub mod company;
pub mod job;
pub mod profile;

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Server-assigned identifier. The API is inconsistent about numeric vs
/// string ids, so both decode; the client never mints one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(i64),
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Number(n) => write!(f, "{n}"),
            EntityId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        EntityId::Number(n)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        EntityId::Text(s.to_string())
    }
}

/// Formats a server timestamp as `dd/mm/yyyy`. Accepts RFC 3339, naive
/// ISO datetimes (with or without fractional seconds) and plain dates.
pub fn display_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()?;
    Some(date.format("%d/%m/%Y").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_accepts_numbers_and_strings() {
        let n: EntityId = serde_json::from_str("7").unwrap();
        let s: EntityId = serde_json::from_str("\"job-7\"").unwrap();
        assert_eq!(n, EntityId::Number(7));
        assert_eq!(s.to_string(), "job-7");
    }

    #[test]
    fn test_display_date_formats() {
        assert_eq!(display_date("2024-03-05T10:15:00Z").as_deref(), Some("05/03/2024"));
        assert_eq!(display_date("2024-03-05T10:15:00.123456").as_deref(), Some("05/03/2024"));
        assert_eq!(display_date("2024-03-05").as_deref(), Some("05/03/2024"));
        assert_eq!(display_date("yesterday"), None);
    }
}
