use crate::api;
use crate::error::AppResult;
use crate::models::question::{CreateSubjectRequest, Subject, UpdateSubjectRequest};
use crate::state::AppState;

#[tauri::command(rename_all = "camelCase")]
pub async fn list_subjects(state: tauri::State<'_, AppState>) -> AppResult<Vec<Subject>> {
    api::subjects::list_subjects(&state.api).await
}

#[tauri::command(rename_all = "camelCase")]
pub async fn create_subject(
    state: tauri::State<'_, AppState>,
    request: CreateSubjectRequest,
) -> AppResult<Subject> {
    api::subjects::create_subject(&state.api, &request).await
}

#[tauri::command(rename_all = "camelCase")]
pub async fn update_subject(
    state: tauri::State<'_, AppState>,
    subject_id: i64,
    request: UpdateSubjectRequest,
) -> AppResult<Subject> {
    api::subjects::update_subject(&state.api, subject_id, &request).await
}

#[tauri::command(rename_all = "camelCase")]
pub async fn delete_subject(state: tauri::State<'_, AppState>, subject_id: i64) -> AppResult<()> {
    api::subjects::delete_subject(&state.api, subject_id).await
}
