use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub key: String,
    pub value: String,
    pub updated_at: String,
}

/// Well-known settings keys.
pub const KEY_AUTH_TOKEN: &str = "auth_token";
pub const KEY_USER_INFO: &str = "user_info";
pub const KEY_SERVER_URL: &str = "server_url";
pub const KEY_CHAT_MODEL: &str = "chat_model";
pub const KEY_CHAT_TEMPERATURE: &str = "chat_temperature";
pub const KEY_CHAT_MAX_TOKENS: &str = "chat_max_tokens";
