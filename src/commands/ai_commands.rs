use tauri::Emitter;
use tokio_util::sync::CancellationToken;

use crate::ai::stream::{ChatStreamError, ChatStreamHandler, ChatStreamOptions};
use crate::api;
use crate::db::settings_repo;
use crate::error::{AppError, AppResult};
use crate::models::chat::{ChatBackendSettings, ChatMessage, ClearHistoryResponse};
use crate::models::settings::{KEY_CHAT_MAX_TOKENS, KEY_CHAT_MODEL, KEY_CHAT_TEMPERATURE};
use crate::state::AppState;

const DEFAULT_HISTORY_LIMIT: i64 = 10;

/// Bridges stream callbacks to the frontend: every delta lands in the
/// shared transcript and is mirrored as a window event.
struct EventForwarder {
    app: tauri::AppHandle,
    state: AppState,
}

impl EventForwarder {
    fn clear_active_chat(&self) {
        if let Ok(mut active) = self.state.active_chat.lock() {
            *active = None;
        }
    }
}

impl ChatStreamHandler for EventForwarder {
    fn on_chunk(&mut self, delta: &str) {
        if let Ok(mut transcript) = self.state.transcript.lock() {
            transcript.append_delta(delta);
        }
        let _ = self.app.emit("ai:chunk", delta);
    }

    fn on_complete(&mut self, full_content: String) {
        if let Ok(mut transcript) = self.state.transcript.lock() {
            transcript.finish(full_content.clone());
        }
        self.clear_active_chat();
        let _ = self.app.emit("ai:complete", &full_content);
    }

    fn on_error(&mut self, error: ChatStreamError) {
        log::error!("Chat stream failed: {error}");
        if let Ok(mut transcript) = self.state.transcript.lock() {
            transcript.rollback_failed_exchange();
        }
        self.clear_active_chat();
        let _ = self.app.emit("ai:error", error.to_string());
    }
}

/// Kick off one streaming exchange. Returns the recorded user turn
/// immediately; deltas and the terminal outcome arrive as `ai:chunk` /
/// `ai:complete` / `ai:error` events.
#[tauri::command(rename_all = "camelCase")]
pub async fn send_chat_message(
    app: tauri::AppHandle,
    state: tauri::State<'_, AppState>,
    message: String,
    options: Option<ChatStreamOptions>,
) -> AppResult<ChatMessage> {
    let message = message.trim().to_string();
    if message.is_empty() {
        return Err(AppError::InvalidRequest("Message must not be empty".into()));
    }

    let options = match options {
        Some(options) => options,
        None => stored_chat_options(state.inner()).await?,
    };

    let cancel = CancellationToken::new();
    {
        let mut active = state
            .active_chat
            .lock()
            .map_err(|e| AppError::Internal(e.to_string()))?;
        // One exchange per conversation at a time.
        if active.is_some() {
            return Err(AppError::InvalidRequest(
                "A chat exchange is already in progress".into(),
            ));
        }
        *active = Some(cancel.clone());
    }

    let user_msg = ChatMessage::user(message.clone(), None);
    match state.transcript.lock() {
        Ok(mut transcript) => transcript.push(user_msg.clone()),
        Err(e) => {
            if let Ok(mut active) = state.active_chat.lock() {
                *active = None;
            }
            return Err(AppError::Internal(e.to_string()));
        }
    }

    let client = state.chat.clone();
    let mut forwarder = EventForwarder {
        app,
        state: state.inner().clone(),
    };
    tokio::spawn(async move {
        client
            .send(&message, &mut forwarder, &options, &cancel)
            .await;
    });

    Ok(user_msg)
}

/// Signal the in-flight exchange, if any. The stream settles through the
/// completion path with whatever text had accumulated.
#[tauri::command(rename_all = "camelCase")]
pub async fn cancel_chat_message(state: tauri::State<'_, AppState>) -> AppResult<()> {
    let active = state
        .active_chat
        .lock()
        .map_err(|e| AppError::Internal(e.to_string()))?;
    if let Some(token) = active.as_ref() {
        log::info!("Cancelling active chat exchange");
        token.cancel();
    }
    Ok(())
}

#[tauri::command(rename_all = "camelCase")]
pub async fn get_chat_transcript(
    state: tauri::State<'_, AppState>,
) -> AppResult<Vec<ChatMessage>> {
    let transcript = state
        .transcript
        .lock()
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(transcript.messages().to_vec())
}

/// Fetch server-side history and make it the visible transcript.
#[tauri::command(rename_all = "camelCase")]
pub async fn get_chat_history(
    state: tauri::State<'_, AppState>,
    limit: Option<i64>,
) -> AppResult<Vec<ChatMessage>> {
    let history = api::chat::get_history(
        &state.api,
        limit.unwrap_or(DEFAULT_HISTORY_LIMIT),
    )
    .await?;

    let mut transcript = state
        .transcript
        .lock()
        .map_err(|e| AppError::Internal(e.to_string()))?;
    transcript.load(history.messages);
    Ok(transcript.messages().to_vec())
}

#[tauri::command(rename_all = "camelCase")]
pub async fn clear_chat_history(
    state: tauri::State<'_, AppState>,
) -> AppResult<ClearHistoryResponse> {
    let response = api::chat::clear_history(&state.api).await?;
    let mut transcript = state
        .transcript
        .lock()
        .map_err(|e| AppError::Internal(e.to_string()))?;
    transcript.clear();
    Ok(response)
}

#[tauri::command(rename_all = "camelCase")]
pub async fn get_chat_settings(
    state: tauri::State<'_, AppState>,
) -> AppResult<ChatBackendSettings> {
    api::chat::get_backend_settings(&state.api).await
}

/// Assemble stream options from locally stored preferences.
async fn stored_chat_options(state: &AppState) -> AppResult<ChatStreamOptions> {
    let state_clone = state.clone();
    tokio::task::spawn_blocking(move || {
        let model = settings_repo::get_setting(&state_clone, KEY_CHAT_MODEL)?.map(|s| s.value);
        let temperature = settings_repo::get_setting(&state_clone, KEY_CHAT_TEMPERATURE)?
            .and_then(|s| s.value.parse().ok());
        let max_tokens = settings_repo::get_setting(&state_clone, KEY_CHAT_MAX_TOKENS)?
            .and_then(|s| s.value.parse().ok());
        Ok(ChatStreamOptions {
            model,
            temperature,
            max_tokens,
        })
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))?
}
