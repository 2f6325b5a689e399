use crate::api::client::ApiClient;
use crate::error::AppResult;
use crate::models::user::{LoginRequest, LoginResponse, RegisterRequest, UserProfile};

pub async fn register(api: &ApiClient, req: &RegisterRequest) -> AppResult<UserProfile> {
    api.post("/auth/register", req).await
}

/// On success the returned JWT must be persisted by the caller; every
/// subsequent request picks it up through the token store.
pub async fn login(api: &ApiClient, req: &LoginRequest) -> AppResult<LoginResponse> {
    api.post("/auth/login", req).await
}
