use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

/// Timestamp as found in exported article documents: either the document
/// store's `{seconds, nanoseconds}` object or a plain date string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StoredTimestamp {
    Store {
        #[serde(alias = "_seconds")]
        seconds: i64,
        #[serde(alias = "_nanoseconds", default)]
        nanoseconds: u32,
    },
    PlainDate(String),
}

impl StoredTimestamp {
    /// Single normalization point; nothing past the import boundary sees this type.
    pub fn normalize(&self) -> DomainResult<DateTime<Utc>> {
        match self {
            StoredTimestamp::Store {
                seconds,
                nanoseconds,
            } => DateTime::from_timestamp(*seconds, *nanoseconds).ok_or_else(|| {
                DomainError::Validation(format!("timestamp out of range: {seconds}s"))
            }),
            StoredTimestamp::PlainDate(raw) => {
                let raw = raw.trim();
                if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
                    return Ok(parsed.with_timezone(&Utc));
                }
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
                    .map(|naive| naive.and_utc())
                    .ok_or_else(|| DomainError::Validation(format!("unrecognized date '{raw}'")))
            }
        }
    }
}
