use serde_json::Value;

use crate::api::client::ApiClient;
use crate::error::AppResult;
use crate::models::exam::{
    ExamPaper, ExamReport, GenerateExamRequest, SaveWrongQuestionRequest, SubmitExamRequest,
};

pub async fn generate_exam(api: &ApiClient, req: &GenerateExamRequest) -> AppResult<ExamPaper> {
    api.post("/exam/generate", req).await
}

/// Grading happens server-side; the report comes back fully scored.
pub async fn submit_exam(api: &ApiClient, req: &SubmitExamRequest) -> AppResult<ExamReport> {
    api.post("/exam/submit", req).await
}

pub async fn save_wrong_question(
    api: &ApiClient,
    req: &SaveWrongQuestionRequest,
) -> AppResult<()> {
    let _: Value = api.post("/exam/save-wrong-question", req).await?;
    Ok(())
}
