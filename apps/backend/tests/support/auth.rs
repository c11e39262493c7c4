//! JWT helpers for tests.

use std::time::{Duration, SystemTime};

use klondike_backend::auth::jwt::mint_access_token;
use klondike_backend::state::security_config::SecurityConfig;

pub fn mint_test_token(sub: &str, email: &str, sec: &SecurityConfig) -> String {
    mint_access_token(sub, email, SystemTime::now(), sec).expect("should mint token")
}

/// Full `Authorization` value, `Bearer ` prefix included.
pub fn bearer_header(sub: &str, email: &str, sec: &SecurityConfig) -> String {
    format!("Bearer {}", mint_test_token(sub, email, sec))
}

/// A token that expired an hour ago.
pub fn mint_expired_token(sub: &str, email: &str, sec: &SecurityConfig) -> String {
    let past = SystemTime::now()
        .checked_sub(Duration::from_secs(7200))
        .expect("clock after epoch");
    mint_access_token(sub, email, past, sec).expect("should mint expired token")
}
