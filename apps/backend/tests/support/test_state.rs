use std::env;
use std::str::FromStr;

use klondike_backend::config::db::{DbKind, RuntimeEnv};
use klondike_backend::infra::state::{build_state, StateBuilder};
use klondike_backend::state::app_state::AppState;
use klondike_backend::state::security_config::SecurityConfig;
use klondike_backend::AppError;

pub const TEST_SECRET: &[u8] = b"klondike-integration-test-secret";

/// `KLONDIKE_TEST_DB_KIND` picks the database; in-memory SQLite otherwise.
pub fn resolve_test_db_kind() -> Result<DbKind, AppError> {
    match env::var("KLONDIKE_TEST_DB_KIND") {
        Ok(raw) => DbKind::from_str(&raw),
        Err(_) => Ok(DbKind::SqliteMemory),
    }
}

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_SECRET)
}

pub fn test_state_builder() -> Result<StateBuilder, AppError> {
    let db_kind = resolve_test_db_kind()?;
    Ok(build_state()
        .with_env(RuntimeEnv::Test)
        .with_db(db_kind)
        .with_security(test_security()))
}

pub async fn build_test_state() -> Result<AppState, AppError> {
    test_state_builder()?.build().await
}
