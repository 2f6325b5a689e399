use crate::api::client::ApiClient;
use crate::error::AppResult;
use crate::models::dashboard::{DashboardStats, MasterySlice, ReviewTrend, SubjectSlice};

pub async fn get_stats(api: &ApiClient) -> AppResult<DashboardStats> {
    api.get("/dashboard/stats", &[]).await
}

pub async fn get_subject_distribution(api: &ApiClient) -> AppResult<Vec<SubjectSlice>> {
    api.get("/dashboard/subject-distribution", &[]).await
}

pub async fn get_review_trend(api: &ApiClient) -> AppResult<ReviewTrend> {
    api.get("/dashboard/review-trend", &[]).await
}

pub async fn get_mastery_status(api: &ApiClient) -> AppResult<Vec<MasterySlice>> {
    api.get("/dashboard/mastery-status", &[]).await
}
