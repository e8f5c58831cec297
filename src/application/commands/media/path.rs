use crate::application::error::{ApplicationError, ApplicationResult};

const MAX_PATH_LEN: usize = 512;

fn is_path_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

/// Validates a relative, `/`-separated object path. Empty, `.`-prefixed and
/// traversal segments are rejected rather than rewritten.
pub fn sanitize_object_path(raw: &str) -> ApplicationResult<String> {
    let trimmed = raw.trim().trim_start_matches('/');
    if trimmed.is_empty() {
        return Err(ApplicationError::validation("object path cannot be empty"));
    }
    if trimmed.len() > MAX_PATH_LEN {
        return Err(ApplicationError::validation("object path is too long"));
    }

    for segment in trimmed.split('/') {
        if segment.is_empty() || segment.starts_with('.') {
            return Err(ApplicationError::validation(format!(
                "invalid object path segment '{segment}'"
            )));
        }
        if !segment.chars().all(is_path_char) {
            return Err(ApplicationError::validation(format!(
                "object path segment '{segment}' contains unsupported characters"
            )));
        }
    }

    Ok(trimmed.to_string())
}

/// Reduces a client file name to a single safe path segment.
pub fn sanitize_file_name(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| if is_path_char(c) { c } else { '_' })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned.to_string()
    }
}
