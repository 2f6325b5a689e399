use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One turn in the assistant conversation. `content` grows in place
/// while a response streams and is frozen once the exchange settles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>, images: Option<Vec<String>>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            images,
            created_at: Some(now_timestamp()),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            images: None,
            created_at: Some(now_timestamp()),
        }
    }
}

fn now_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatHistory {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearHistoryResponse {
    pub deleted_count: i64,
}

/// Backend chat defaults surfaced to the settings screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatBackendSettings {
    pub model: String,
    pub max_tokens: i64,
    #[serde(default)]
    pub supports_images: bool,
    #[serde(default)]
    pub streaming: bool,
}
