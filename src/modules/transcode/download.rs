use axum::{
    body::Body,
    extract::{Extension, Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tokio_util::io::ReaderStream;
use tracing::{error, info};
use uuid::Uuid;

use super::service::TranscodeService;
use crate::common::relay::relay_body;
use crate::common::response::ApiError;
use crate::infrastructure::storage::Locator;
use crate::modules::auth::dto::Identity;
use crate::state::AppState;

/// Download the transcoded output of a job
/// Streams the object from storage to the caller without buffering it
#[utoipa::path(
    get,
    path = "/auth/video/transcode/{id}/download",
    params(
        ("id" = String, Path, description = "Transcoding job ID (UUID)")
    ),
    responses(
        (status = 200, description = "Video file, streamed as an attachment"),
        (status = 400, description = "Invalid video ID or storage location"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found, not owned, or not ready"),
        (status = 500, description = "Storage error")
    ),
    security(("bearer_auth" = [])),
    tag = "Transcode"
)]
pub async fn download_output(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = TranscodeService::parse_id(&raw_id)?;
    let job = TranscodeService::get(&state, &identity, id).await?;

    let raw_locator = job.output_locator().ok_or(ApiError::NotReady)?;
    let locator = Locator::parse(raw_locator).map_err(|e| {
        error!(%id, error = %e, "error parsing output locator");
        ApiError::MalformedLocator
    })?;

    let object = state
        .storage
        .get_object(&locator.bucket, &locator.key)
        .await
        .map_err(|e| {
            error!(%id, bucket = %locator.bucket, key = %locator.key, error = %e, "error getting object from storage");
            ApiError::StorageUnavailable
        })?;

    let filename = derive_filename(&locator.key, id);
    let content_type = content_type_for(&filename);

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        );

    if let Some(len) = object.content_length {
        builder = builder.header(header::CONTENT_LENGTH, len);
    }

    info!(user_id = identity.user_id, %id, %filename, "streaming video download");

    let body: Body = relay_body(ReaderStream::new(object.body), "video download", identity.user_id);

    Ok(builder
        .body(body)
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response()))
}

/// Last path segment of the object key, made safe for a quoted header
/// parameter. Falls back to `video_<id>.mp4` when the key has no usable
/// final segment.
pub fn derive_filename(key: &str, id: Uuid) -> String {
    let segment = key.trim_end_matches('/').rsplit('/').next().unwrap_or("");

    if segment.is_empty() || segment == "." {
        return format!("video_{id}.mp4");
    }

    segment
        .chars()
        .map(|c| if c == '"' || c == '\\' || c.is_control() { '_' } else { c })
        .collect()
}

pub fn content_type_for(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "mp4" => "video/mp4",
        "avi" => "video/x-msvideo",
        "mov" => "video/quicktime",
        "wmv" => "video/x-ms-wmv",
        "flv" => "video/x-flv",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> Uuid {
        Uuid::parse_str("6f1c2a9e-3b0d-4f3e-9a55-0c1d2e3f4a5b").unwrap()
    }

    #[test]
    fn filename_is_last_segment() {
        assert_eq!(derive_filename("path/to/file.mp4", id()), "file.mp4");
        assert_eq!(derive_filename("file.mov", id()), "file.mov");
        assert_eq!(derive_filename("dir/clip.webm/", id()), "clip.webm");
    }

    #[test]
    fn filename_falls_back_for_empty_segments() {
        let fallback = format!("video_{}.mp4", id());
        assert_eq!(derive_filename("", id()), fallback);
        assert_eq!(derive_filename("/", id()), fallback);
        assert_eq!(derive_filename("///", id()), fallback);
        assert_eq!(derive_filename("a/.", id()), fallback);
    }

    #[test]
    fn filename_is_header_safe() {
        assert_eq!(derive_filename("x/we\"ird.mp4", id()), "we_ird.mp4");
    }

    #[test]
    fn content_types_follow_extension_table() {
        assert_eq!(content_type_for("file.mp4"), "video/mp4");
        assert_eq!(content_type_for("FILE.MKV"), "video/x-matroska");
        assert_eq!(content_type_for("a.avi"), "video/x-msvideo");
        assert_eq!(content_type_for("a.mov"), "video/quicktime");
        assert_eq!(content_type_for("a.wmv"), "video/x-ms-wmv");
        assert_eq!(content_type_for("a.flv"), "video/x-flv");
        assert_eq!(content_type_for("a.webm"), "video/webm");
    }

    #[test]
    fn unknown_extensions_are_octet_stream() {
        assert_eq!(content_type_for("subs.srt"), "application/octet-stream");
        assert_eq!(content_type_for("noextension"), "application/octet-stream");
    }

    #[test]
    fn locator_scenario_end_to_end() {
        let locator = Locator::parse("s3://bucket-a/path/to/file.mp4").unwrap();
        let filename = derive_filename(&locator.key, id());
        assert_eq!(locator.bucket, "bucket-a");
        assert_eq!(locator.key, "path/to/file.mp4");
        assert_eq!(filename, "file.mp4");
        assert_eq!(content_type_for(&filename), "video/mp4");
    }
}
