use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::api::client::TokenStore;
use crate::db::settings_repo;
use crate::models::settings::KEY_AUTH_TOKEN;

/// Credential provider backed by the local settings table. The session
/// token lands here on login and is cleared on logout; every request
/// reads the current value so a re-login takes effect immediately.
pub struct SqliteTokenStore {
    db: Arc<Mutex<Connection>>,
}

impl SqliteTokenStore {
    pub fn new(db: Arc<Mutex<Connection>>) -> Self {
        Self { db }
    }
}

impl TokenStore for SqliteTokenStore {
    fn token(&self) -> Option<String> {
        let db = self.db.lock().ok()?;
        match settings_repo::get_value(&db, KEY_AUTH_TOKEN) {
            Ok(token) => token,
            Err(e) => {
                log::warn!("Failed to read auth token: {e}");
                None
            }
        }
    }
}
