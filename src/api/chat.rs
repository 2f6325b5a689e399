use crate::api::client::ApiClient;
use crate::error::AppResult;
use crate::models::chat::{ChatBackendSettings, ChatHistory, ClearHistoryResponse};

/// Non-streaming chat endpoints. The streaming exchange itself lives in
/// `crate::ai::stream`.
pub async fn get_history(api: &ApiClient, limit: i64) -> AppResult<ChatHistory> {
    api.get("/ai/chat/history", &[("limit", limit.to_string())])
        .await
}

pub async fn clear_history(api: &ApiClient) -> AppResult<ClearHistoryResponse> {
    api.delete("/ai/chat/history").await
}

pub async fn get_backend_settings(api: &ApiClient) -> AppResult<ChatBackendSettings> {
    api.get("/ai/chat/settings", &[]).await
}
