// src/application/ports/storage.rs
use crate::application::ApplicationResult;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub path: String,
    pub url: String,
    pub size: u64,
    pub checksum: String,
}

#[derive(Debug, Clone)]
pub struct ObjectMeta {
    pub content_type: String,
    pub size: u64,
    pub modified_at: Option<DateTime<Utc>>,
}

/// Binary object store mapping relative paths to publicly fetchable URLs.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores `data` at `path`, replacing any previous object.
    async fn put(&self, path: &str, data: Bytes, content_type: &str)
    -> ApplicationResult<StoredObject>;

    async fn get(&self, path: &str) -> ApplicationResult<Option<(Bytes, ObjectMeta)>>;

    fn public_url(&self, path: &str) -> String;
}
