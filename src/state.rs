use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use tokio_util::sync::CancellationToken;

use crate::ai::stream::StreamingChatClient;
use crate::ai::transcript::ChatTranscript;
use crate::api::client::ApiClient;
use crate::db::settings_repo;
use crate::db::token_store::SqliteTokenStore;
use crate::models::settings::KEY_SERVER_URL;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000/api";

pub struct AppState {
    /// SQLite database connection for local client state
    pub db: Arc<Mutex<Connection>>,
    /// Typed REST client for the study service
    pub api: ApiClient,
    /// Streaming client for the solving assistant
    pub chat: StreamingChatClient,
    /// Conversation state for the assistant screen
    pub transcript: Arc<Mutex<ChatTranscript>>,
    /// Cancellation token of the in-flight chat exchange, if any
    pub active_chat: Arc<Mutex<Option<CancellationToken>>>,
}

impl AppState {
    pub fn new(conn: Connection) -> Self {
        let server_url = settings_repo::get_value(&conn, KEY_SERVER_URL)
            .ok()
            .flatten()
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        let db = Arc::new(Mutex::new(conn));
        let tokens = Arc::new(SqliteTokenStore::new(Arc::clone(&db)));

        Self {
            db,
            api: ApiClient::new(server_url.clone(), tokens.clone()),
            chat: StreamingChatClient::new(server_url, tokens),
            transcript: Arc::new(Mutex::new(ChatTranscript::new())),
            active_chat: Arc::new(Mutex::new(None)),
        }
    }
}

// Implement Clone manually to allow state sharing in spawned tasks
impl Clone for AppState {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            api: self.api.clone(),
            chat: self.chat.clone(),
            transcript: Arc::clone(&self.transcript),
            active_chat: Arc::clone(&self.active_chat),
        }
    }
}
