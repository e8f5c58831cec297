use super::{MediaCommandService, sanitize_file_name, sanitize_object_path};
use crate::application::{
    dto::{AuthenticatedUser, MediaDto},
    error::{ApplicationError, ApplicationResult},
};
use bytes::Bytes;
use tracing::info;

const DEFAULT_PREFIX: &str = "blog-images";

pub struct UploadImageCommand {
    /// Target path; when absent one is derived from the upload time and file name.
    pub path: Option<String>,
    pub file_name: Option<String>,
    pub content_type: String,
    pub data: Bytes,
}

impl MediaCommandService {
    pub async fn upload_image(
        &self,
        actor: &AuthenticatedUser,
        command: UploadImageCommand,
    ) -> ApplicationResult<MediaDto> {
        let content_type = command.content_type.trim().to_ascii_lowercase();
        if !content_type.starts_with("image/") {
            return Err(ApplicationError::validation(format!(
                "unsupported content type '{content_type}', expected an image"
            )));
        }
        if command.data.is_empty() {
            return Err(ApplicationError::validation("uploaded file is empty"));
        }
        if command.data.len() > self.max_upload_bytes {
            return Err(ApplicationError::validation(format!(
                "file exceeds the {} byte upload limit",
                self.max_upload_bytes
            )));
        }

        let path = match command.path.as_deref().filter(|p| !p.trim().is_empty()) {
            Some(raw) => sanitize_object_path(raw)?,
            None => self.default_path(command.file_name.as_deref()),
        };

        let stored = self.store.put(&path, command.data, &content_type).await?;
        info!(
            path = %stored.path,
            size = stored.size,
            user_id = actor.id.0,
            "image uploaded"
        );
        Ok(MediaDto::from_stored(stored, content_type))
    }

    fn default_path(&self, file_name: Option<&str>) -> String {
        let millis = self.clock.now().timestamp_millis();
        let name = sanitize_file_name(file_name.unwrap_or_default());
        format!("{DEFAULT_PREFIX}/{millis}_{name}")
    }
}
