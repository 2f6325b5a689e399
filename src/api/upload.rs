use std::path::Path;

use crate::api::client::ApiClient;
use crate::error::{AppError, AppResult};
use crate::models::user::UploadedFile;

/// Upload a local file through the generic upload endpoint.
/// `upload_type` selects the server-side bucket: question, avatar or
/// general.
pub async fn upload_file(
    api: &ApiClient,
    path: &Path,
    upload_type: &str,
) -> AppResult<UploadedFile> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| AppError::InvalidRequest("File has no usable name".into()))?
        .to_string();

    let bytes = tokio::fs::read(path).await?;

    let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
    let form = reqwest::multipart::Form::new()
        .part("file", part)
        .text("type", upload_type.to_string());

    api.post_multipart("/upload/file", form).await
}
