use crate::api::client::ApiClient;
use crate::error::AppResult;
use crate::models::user::{
    AvatarResponse, ChangePasswordRequest, UpdateProfileRequest, UserProfile,
};

pub async fn get_profile(api: &ApiClient) -> AppResult<UserProfile> {
    api.get("/profile", &[]).await
}

pub async fn update_profile(api: &ApiClient, req: &UpdateProfileRequest) -> AppResult<UserProfile> {
    api.put("/profile", req).await
}

pub async fn change_password(api: &ApiClient, req: &ChangePasswordRequest) -> AppResult<()> {
    api.put_unit("/password", req).await
}

pub async fn upload_avatar(
    api: &ApiClient,
    file_name: String,
    bytes: Vec<u8>,
) -> AppResult<AvatarResponse> {
    let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
    let form = reqwest::multipart::Form::new().part("avatar", part);
    api.post_multipart("/avatar", form).await
}
