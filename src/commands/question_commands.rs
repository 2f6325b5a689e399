use crate::api;
use crate::error::AppResult;
use crate::models::question::{
    CreateQuestionRequest, QuestionDetail, QuestionListQuery, QuestionPage, UpdateQuestionRequest,
};
use crate::state::AppState;

#[tauri::command(rename_all = "camelCase")]
pub async fn list_questions(
    state: tauri::State<'_, AppState>,
    query: QuestionListQuery,
) -> AppResult<QuestionPage> {
    api::questions::list_questions(&state.api, &query).await
}

#[tauri::command(rename_all = "camelCase")]
pub async fn get_question(
    state: tauri::State<'_, AppState>,
    question_id: i64,
) -> AppResult<QuestionDetail> {
    api::questions::get_question(&state.api, question_id).await
}

#[tauri::command(rename_all = "camelCase")]
pub async fn create_question(
    state: tauri::State<'_, AppState>,
    request: CreateQuestionRequest,
) -> AppResult<QuestionDetail> {
    api::questions::create_question(&state.api, &request).await
}

#[tauri::command(rename_all = "camelCase")]
pub async fn update_question(
    state: tauri::State<'_, AppState>,
    question_id: i64,
    request: UpdateQuestionRequest,
) -> AppResult<QuestionDetail> {
    api::questions::update_question(&state.api, question_id, &request).await
}

#[tauri::command(rename_all = "camelCase")]
pub async fn delete_question(
    state: tauri::State<'_, AppState>,
    question_id: i64,
) -> AppResult<()> {
    api::questions::delete_question(&state.api, question_id).await
}
