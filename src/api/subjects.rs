use crate::api::client::ApiClient;
use crate::error::AppResult;
use crate::models::question::{CreateSubjectRequest, Subject, UpdateSubjectRequest};

pub async fn list_subjects(api: &ApiClient) -> AppResult<Vec<Subject>> {
    api.get("/subjects", &[]).await
}

pub async fn create_subject(api: &ApiClient, req: &CreateSubjectRequest) -> AppResult<Subject> {
    api.post("/subjects", req).await
}

pub async fn update_subject(
    api: &ApiClient,
    subject_id: i64,
    req: &UpdateSubjectRequest,
) -> AppResult<Subject> {
    api.put(&format!("/subjects/{subject_id}"), req).await
}

pub async fn delete_subject(api: &ApiClient, subject_id: i64) -> AppResult<()> {
    api.delete_unit(&format!("/subjects/{subject_id}")).await
}
