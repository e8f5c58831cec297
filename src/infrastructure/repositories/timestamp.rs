use crate::application::dto::serde_time;
use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Utc};

pub(super) fn encode(value: &DateTime<Utc>) -> String {
    serde_time::format(value)
}

pub(super) fn decode(raw: &str) -> DomainResult<DateTime<Utc>> {
    serde_time::parse(raw)
        .map_err(|err| DomainError::Persistence(format!("corrupt timestamp '{raw}': {err}")))
}
