use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::services::game_locks::GameLocks;

/// Shared resources handed to every handler through `web::Data`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// None only in tests that never touch storage
    pub db: Option<DatabaseConnection>,
    pub security: SecurityConfig,
    /// Per-game write serialization
    pub game_locks: GameLocks,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self {
            db: Some(db),
            security,
            game_locks: GameLocks::default(),
        }
    }

    pub fn without_db(security: SecurityConfig) -> Self {
        Self {
            db: None,
            security,
            game_locks: GameLocks::default(),
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
