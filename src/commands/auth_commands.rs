use crate::api;
use crate::db::settings_repo;
use crate::error::{AppError, AppResult};
use crate::models::settings::{KEY_AUTH_TOKEN, KEY_USER_INFO};
use crate::models::user::{LoginRequest, LoginResponse, RegisterRequest, UserProfile};
use crate::state::AppState;

#[tauri::command(rename_all = "camelCase")]
pub async fn register(
    state: tauri::State<'_, AppState>,
    username: String,
    password: String,
) -> AppResult<UserProfile> {
    api::auth::register(&state.api, &RegisterRequest { username, password }).await
}

#[tauri::command(rename_all = "camelCase")]
pub async fn login(
    state: tauri::State<'_, AppState>,
    username: String,
    password: String,
) -> AppResult<LoginResponse> {
    let response = api::auth::login(&state.api, &LoginRequest { username, password }).await?;
    log::info!("Logged in as {}", response.user_info.username);

    // Persist the session so the token store picks it up on the next
    // request.
    let token = response.token.clone();
    let user_json = serde_json::to_string(&response.user_info)?;
    let state_clone = state.inner().clone();
    tokio::task::spawn_blocking(move || {
        settings_repo::set_setting(&state_clone, KEY_AUTH_TOKEN, &token)?;
        settings_repo::set_setting(&state_clone, KEY_USER_INFO, &user_json)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(response)
}

#[tauri::command(rename_all = "camelCase")]
pub async fn logout(state: tauri::State<'_, AppState>) -> AppResult<()> {
    let state_clone = state.inner().clone();
    tokio::task::spawn_blocking(move || {
        settings_repo::delete_setting(&state_clone, KEY_AUTH_TOKEN)?;
        settings_repo::delete_setting(&state_clone, KEY_USER_INFO)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;
    Ok(())
}

/// Cached profile from the last login, if any.
#[tauri::command(rename_all = "camelCase")]
pub async fn current_user(state: tauri::State<'_, AppState>) -> AppResult<Option<UserProfile>> {
    let state_clone = state.inner().clone();
    let setting = tokio::task::spawn_blocking(move || {
        settings_repo::get_setting(&state_clone, KEY_USER_INFO)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    match setting {
        Some(s) => Ok(Some(serde_json::from_str(&s.value)?)),
        None => Ok(None),
    }
}
