use crate::application::{
    commands::media::UploadImageCommand, dto::MediaDto, error::ApplicationError,
};
use crate::presentation::http::error::{ErrorResponse, HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    body::Body,
    extract::{Multipart, Path},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use std::time::SystemTime;
use utoipa::ToSchema;

/// Multipart form accepted by the upload route.
#[derive(Debug, ToSchema)]
pub struct UploadImageForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    /// Relative target path, e.g. `blog-images/cover.png`.
    pub path: Option<String>,
}

fn multipart_error(err: impl std::fmt::Display) -> HttpError {
    HttpError::bad_request(format!("malformed multipart body: {err}"))
}

#[utoipa::path(
    post,
    path = "/api/v1/media",
    request_body(content = UploadImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image stored.", body = MediaDto),
        (status = 400, description = "Not an image, too large, or bad path.", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Media"
)]
pub async fn upload_image(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    mut multipart: Multipart,
) -> HttpResult<(StatusCode, Json<MediaDto>)> {
    let mut file: Option<(Option<String>, String, Bytes)> = None;
    let mut path: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        match field.name() {
            Some("file") => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await.map_err(multipart_error)?;
                file = Some((file_name, content_type, data));
            }
            Some("path") => {
                path = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    let (file_name, content_type, data) = file.ok_or_else(|| {
        HttpError::from_error(ApplicationError::validation("missing 'file' field"))
    })?;

    let command = UploadImageCommand {
        path,
        file_name,
        content_type,
        data,
    };
    let stored = state
        .services
        .media_commands
        .upload_image(&user, command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(stored)))
}

#[utoipa::path(
    get,
    path = "/media/{path}",
    params(("path" = String, Path, description = "Object path")),
    responses(
        (status = 200, description = "Stored object bytes."),
        (status = 404, description = "No such object.", body = ErrorResponse)
    ),
    security(()),
    tag = "Media"
)]
pub async fn serve_media(
    Extension(state): Extension<HttpState>,
    Path(path): Path<String>,
) -> HttpResult<Response> {
    let (data, meta) = state
        .services
        .object_store()
        .get(&path)
        .await
        .into_http()?
        .ok_or_else(|| HttpError::from_error(ApplicationError::not_found("media not found")))?;

    let mut response = Body::from(data).into_response();
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&meta.content_type) {
        headers.insert(header::CONTENT_TYPE, value);
    }
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(meta.size));
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=86400"),
    );
    if let Some(modified) = meta.modified_at {
        let stamp = httpdate::fmt_http_date(SystemTime::from(modified));
        if let Ok(value) = HeaderValue::from_str(&stamp) {
            headers.insert(header::LAST_MODIFIED, value);
        }
    }
    Ok(response)
}
