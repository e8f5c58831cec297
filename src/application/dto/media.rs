use crate::application::ports::storage::StoredObject;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MediaDto {
    pub path: String,
    pub url: String,
    pub content_type: String,
    pub size: u64,
    /// blake3 digest of the stored bytes, hex encoded.
    pub checksum: String,
}

impl MediaDto {
    pub fn from_stored(stored: StoredObject, content_type: impl Into<String>) -> Self {
        Self {
            path: stored.path,
            url: stored.url,
            content_type: content_type.into(),
            size: stored.size,
            checksum: stored.checksum,
        }
    }
}
