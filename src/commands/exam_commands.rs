use crate::api;
use crate::error::AppResult;
use crate::models::exam::{
    ExamPaper, ExamReport, GenerateExamRequest, SaveWrongQuestionRequest, SubmitExamRequest,
};
use crate::state::AppState;

#[tauri::command(rename_all = "camelCase")]
pub async fn generate_exam(
    state: tauri::State<'_, AppState>,
    request: GenerateExamRequest,
) -> AppResult<ExamPaper> {
    api::exams::generate_exam(&state.api, &request).await
}

#[tauri::command(rename_all = "camelCase")]
pub async fn submit_exam(
    state: tauri::State<'_, AppState>,
    request: SubmitExamRequest,
) -> AppResult<ExamReport> {
    api::exams::submit_exam(&state.api, &request).await
}

#[tauri::command(rename_all = "camelCase")]
pub async fn save_wrong_question(
    state: tauri::State<'_, AppState>,
    request: SaveWrongQuestionRequest,
) -> AppResult<()> {
    api::exams::save_wrong_question(&state.api, &request).await
}
