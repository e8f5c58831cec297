// tests/support/mocks/storage.rs
use async_trait::async_trait;
use bytes::Bytes;
use folio_core::application::{
    ApplicationResult,
    ports::storage::{ObjectMeta, ObjectStore, StoredObject},
};
use std::collections::HashMap;
use std::sync::Mutex;

use super::time::fixed_now;

#[derive(Debug, Default)]
pub struct InMemoryObjectStore {
    objects: Mutex<HashMap<String, (Bytes, String)>>,
}

impl InMemoryObjectStore {
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.objects.lock().unwrap().keys().cloned().collect();
        paths.sort();
        paths
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put(
        &self,
        path: &str,
        data: Bytes,
        content_type: &str,
    ) -> ApplicationResult<StoredObject> {
        let stored = StoredObject {
            path: path.to_string(),
            url: self.public_url(path),
            size: data.len() as u64,
            checksum: blake3::hash(&data).to_hex().to_string(),
        };
        self.objects
            .lock()
            .unwrap()
            .insert(path.to_string(), (data, content_type.to_string()));
        Ok(stored)
    }

    async fn get(&self, path: &str) -> ApplicationResult<Option<(Bytes, ObjectMeta)>> {
        Ok(self
            .objects
            .lock()
            .unwrap()
            .get(path)
            .map(|(data, content_type)| {
                let meta = ObjectMeta {
                    content_type: content_type.clone(),
                    size: data.len() as u64,
                    modified_at: Some(fixed_now()),
                };
                (data.clone(), meta)
            }))
    }

    fn public_url(&self, path: &str) -> String {
        format!("http://localhost:8080/media/{path}")
    }
}
