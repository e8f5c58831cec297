use crate::application::{
    commands::media::sanitize_object_path,
    error::{ApplicationError, ApplicationResult},
    ports::storage::{ObjectMeta, ObjectStore, StoredObject},
};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tokio::fs;

// Object paths may not start a segment with '.', so this directory is never addressable.
const META_DIR: &str = ".meta";
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Stores objects as plain files under `root`, with the content type kept in
/// a sidecar file.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
    base_url: String,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn object_file(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    fn meta_file(&self, path: &str) -> PathBuf {
        self.root.join(META_DIR).join(path)
    }
}

fn io_error(context: &str, err: std::io::Error) -> ApplicationError {
    ApplicationError::infrastructure(format!("{context}: {err}"))
}

async fn write_atomically(target: &Path, data: &[u8]) -> ApplicationResult<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|err| io_error("create media directory", err))?;
    }
    let mut staging = target.as_os_str().to_owned();
    staging.push(format!(".{}.tmp", uuid::Uuid::new_v4().simple()));
    let staging = PathBuf::from(staging);

    fs::write(&staging, data)
        .await
        .map_err(|err| io_error("write media object", err))?;
    if let Err(err) = fs::rename(&staging, target).await {
        let _ = fs::remove_file(&staging).await;
        return Err(io_error("commit media object", err));
    }
    Ok(())
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn put(
        &self,
        path: &str,
        data: Bytes,
        content_type: &str,
    ) -> ApplicationResult<StoredObject> {
        let path = sanitize_object_path(path)?;
        let checksum = blake3::hash(&data).to_hex().to_string();
        let size = data.len() as u64;

        write_atomically(&self.object_file(&path), &data).await?;
        write_atomically(&self.meta_file(&path), content_type.as_bytes()).await?;

        Ok(StoredObject {
            url: self.public_url(&path),
            path,
            size,
            checksum,
        })
    }

    async fn get(&self, path: &str) -> ApplicationResult<Option<(Bytes, ObjectMeta)>> {
        let Ok(path) = sanitize_object_path(path) else {
            return Ok(None);
        };

        let file = self.object_file(&path);
        let data = match fs::read(&file).await {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) if err.kind() == ErrorKind::IsADirectory => return Ok(None),
            Err(err) => return Err(io_error("read media object", err)),
        };

        let modified_at = fs::metadata(&file)
            .await
            .and_then(|meta| meta.modified())
            .ok()
            .map(DateTime::<Utc>::from);
        let content_type = match fs::read_to_string(self.meta_file(&path)).await {
            Ok(raw) if !raw.trim().is_empty() => raw.trim().to_string(),
            _ => FALLBACK_CONTENT_TYPE.to_string(),
        };

        let meta = ObjectMeta {
            content_type,
            size: data.len() as u64,
            modified_at,
        };
        Ok(Some((Bytes::from(data), meta)))
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/media/{}", self.base_url, path.trim_start_matches('/'))
    }
}
