use serde_json::json;

use crate::api::client::ApiClient;
use crate::error::AppResult;
use crate::models::review::{
    ReviewList, ReviewListQuery, ReviewOutcome, ReviewStats, SubmitReviewResponse,
};

pub async fn get_stats(api: &ApiClient) -> AppResult<ReviewStats> {
    api.get("/review/stats", &[]).await
}

pub async fn list_questions(api: &ApiClient, query: &ReviewListQuery) -> AppResult<ReviewList> {
    let mut params = Vec::new();
    if let Some(mode) = query.mode {
        params.push(("mode", mode.as_str().to_string()));
    }
    if let Some(subject_id) = query.subject_id {
        params.push(("subject_id", subject_id.to_string()));
    }
    if let Some(difficulty) = query.difficulty {
        params.push(("difficulty", difficulty.to_string()));
    }
    if let Some(limit) = query.limit {
        // Random-draw path; the server skips pagination entirely.
        params.push(("limit", limit.to_string()));
    } else {
        if let Some(page) = query.page {
            params.push(("page", page.to_string()));
        }
        if let Some(page_size) = query.page_size {
            params.push(("page_size", page_size.to_string()));
        }
    }

    api.get("/review/list", &params).await
}

pub async fn submit_review(
    api: &ApiClient,
    question_id: i64,
    outcome: ReviewOutcome,
) -> AppResult<SubmitReviewResponse> {
    api.post(&format!("/review/{question_id}"), &json!({ "result": outcome }))
        .await
}
