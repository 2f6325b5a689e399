use crate::api;
use crate::error::AppResult;
use crate::models::dashboard::{DashboardStats, MasterySlice, ReviewTrend, SubjectSlice};
use crate::state::AppState;

#[tauri::command(rename_all = "camelCase")]
pub async fn get_dashboard_stats(state: tauri::State<'_, AppState>) -> AppResult<DashboardStats> {
    api::dashboard::get_stats(&state.api).await
}

#[tauri::command(rename_all = "camelCase")]
pub async fn get_subject_distribution(
    state: tauri::State<'_, AppState>,
) -> AppResult<Vec<SubjectSlice>> {
    api::dashboard::get_subject_distribution(&state.api).await
}

#[tauri::command(rename_all = "camelCase")]
pub async fn get_review_trend(state: tauri::State<'_, AppState>) -> AppResult<ReviewTrend> {
    api::dashboard::get_review_trend(&state.api).await
}

#[tauri::command(rename_all = "camelCase")]
pub async fn get_mastery_status(
    state: tauri::State<'_, AppState>,
) -> AppResult<Vec<MasterySlice>> {
    api::dashboard::get_mastery_status(&state.api).await
}
