use std::path::PathBuf;

use crate::api;
use crate::error::{AppError, AppResult};
use crate::models::user::{
    AvatarResponse, ChangePasswordRequest, UpdateProfileRequest, UploadedFile, UserProfile,
};
use crate::state::AppState;

#[tauri::command(rename_all = "camelCase")]
pub async fn get_profile(state: tauri::State<'_, AppState>) -> AppResult<UserProfile> {
    api::profile::get_profile(&state.api).await
}

#[tauri::command(rename_all = "camelCase")]
pub async fn update_profile(
    state: tauri::State<'_, AppState>,
    request: UpdateProfileRequest,
) -> AppResult<UserProfile> {
    api::profile::update_profile(&state.api, &request).await
}

#[tauri::command(rename_all = "camelCase")]
pub async fn change_password(
    state: tauri::State<'_, AppState>,
    old_password: String,
    new_password: String,
) -> AppResult<()> {
    api::profile::change_password(
        &state.api,
        &ChangePasswordRequest {
            old_password,
            new_password,
        },
    )
    .await
}

#[tauri::command(rename_all = "camelCase")]
pub async fn upload_avatar(
    state: tauri::State<'_, AppState>,
    path: PathBuf,
) -> AppResult<AvatarResponse> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| AppError::InvalidRequest("File has no usable name".into()))?
        .to_string();
    let bytes = tokio::fs::read(&path).await?;
    api::profile::upload_avatar(&state.api, file_name, bytes).await
}

/// Generic upload for question/answer/explanation attachments.
#[tauri::command(rename_all = "camelCase")]
pub async fn upload_file(
    state: tauri::State<'_, AppState>,
    path: PathBuf,
    upload_type: Option<String>,
) -> AppResult<UploadedFile> {
    let upload_type = upload_type.unwrap_or_else(|| "general".to_string());
    api::upload::upload_file(&state.api, &path, &upload_type).await
}
