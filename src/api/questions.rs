use crate::api::client::ApiClient;
use crate::error::AppResult;
use crate::models::question::{
    CreateQuestionRequest, QuestionDetail, QuestionListQuery, QuestionPage, UpdateQuestionRequest,
};

pub async fn list_questions(api: &ApiClient, query: &QuestionListQuery) -> AppResult<QuestionPage> {
    let mut params = vec![
        ("page", query.page.to_string()),
        ("page_size", query.page_size.to_string()),
    ];
    if let Some(keyword) = &query.keyword {
        params.push(("keyword", keyword.clone()));
    }
    if let Some(subject_id) = query.subject_id {
        params.push(("subject_id", subject_id.to_string()));
    }
    if let Some(difficulty) = query.difficulty {
        params.push(("difficulty", difficulty.to_string()));
    }
    if let Some(question_type) = &query.question_type {
        params.push(("question_type", question_type.clone()));
    }
    if let Some(review_status) = query.review_status {
        params.push(("review_status", review_status.to_string()));
    }
    if let Some(start_date) = &query.start_date {
        params.push(("start_date", start_date.clone()));
    }
    if let Some(end_date) = &query.end_date {
        params.push(("end_date", end_date.clone()));
    }

    api.get("/questions", &params).await
}

pub async fn get_question(api: &ApiClient, question_id: i64) -> AppResult<QuestionDetail> {
    api.get(&format!("/questions/{question_id}"), &[]).await
}

pub async fn create_question(
    api: &ApiClient,
    req: &CreateQuestionRequest,
) -> AppResult<QuestionDetail> {
    api.post("/questions", req).await
}

pub async fn update_question(
    api: &ApiClient,
    question_id: i64,
    req: &UpdateQuestionRequest,
) -> AppResult<QuestionDetail> {
    api.put(&format!("/questions/{question_id}"), req).await
}

/// Soft delete; the record disappears from every listing.
pub async fn delete_question(api: &ApiClient, question_id: i64) -> AppResult<()> {
    api.delete_unit(&format!("/questions/{question_id}")).await
}
