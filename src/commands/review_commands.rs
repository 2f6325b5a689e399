use crate::api;
use crate::error::AppResult;
use crate::models::review::{
    ReviewList, ReviewListQuery, ReviewOutcome, ReviewStats, SubmitReviewResponse,
};
use crate::state::AppState;

#[tauri::command(rename_all = "camelCase")]
pub async fn get_review_stats(state: tauri::State<'_, AppState>) -> AppResult<ReviewStats> {
    api::reviews::get_stats(&state.api).await
}

#[tauri::command(rename_all = "camelCase")]
pub async fn list_review_questions(
    state: tauri::State<'_, AppState>,
    query: ReviewListQuery,
) -> AppResult<ReviewList> {
    api::reviews::list_questions(&state.api, &query).await
}

#[tauri::command(rename_all = "camelCase")]
pub async fn submit_review(
    state: tauri::State<'_, AppState>,
    question_id: i64,
    outcome: ReviewOutcome,
) -> AppResult<SubmitReviewResponse> {
    api::reviews::submit_review(&state.api, question_id, outcome).await
}
