//! ETag helpers for optimistic concurrency on games.
//!
//! A game's ETag is derived from its id and `lock_version`. Clients echo it
//! in `If-Match` on writes and `If-None-Match` on reads.

use actix_web::http::header::{IF_MATCH, IF_NONE_MATCH};
use actix_web::HttpRequest;

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Format: `"game-{id}-v{version}"`, quotes included.
///
/// ```
/// # use klondike_backend::http::etag::game_etag;
/// assert_eq!(game_etag(123, 5), r#""game-123-v5""#);
/// ```
pub fn game_etag(id: i64, version: i32) -> String {
    format!(r#""game-{id}-v{version}""#)
}

/// Extract the lock version from a game ETag. Quotes and a weak `W/`
/// prefix are tolerated.
///
/// ```
/// # use klondike_backend::http::etag::parse_game_version_from_etag;
/// assert_eq!(parse_game_version_from_etag(r#""game-123-v5""#).unwrap(), 5);
/// ```
pub fn parse_game_version_from_etag(s: &str) -> Result<i32, AppError> {
    let s = s.trim().trim_start_matches("W/").trim_matches('"');

    let version_start = s.rfind("-v").ok_or_else(|| {
        AppError::bad_request(
            ErrorCode::InvalidHeader,
            format!("Invalid ETag format: expected \"game-{{id}}-v{{version}}\", got: \"{s}\""),
        )
    })? + 2;

    let version_str = &s[version_start..];
    version_str.parse::<i32>().map_err(|_| {
        AppError::bad_request(
            ErrorCode::InvalidHeader,
            format!("Invalid ETag format: version must be an integer, got: \"{version_str}\""),
        )
    })
}

/// The version a write expects, from `If-Match`. Absent or `*` means the
/// caller accepts whatever is stored.
pub fn expected_version(req: &HttpRequest) -> Result<Option<i32>, AppError> {
    let Some(raw) = req.headers().get(IF_MATCH) else {
        return Ok(None);
    };
    let value = raw.to_str().map_err(|_| {
        AppError::bad_request(ErrorCode::InvalidHeader, "If-Match must be visible ASCII")
    })?;
    if value.trim() == "*" {
        return Ok(None);
    }
    parse_game_version_from_etag(value).map(Some)
}

/// True when `If-None-Match` names `etag` or is `*`.
pub fn not_modified(req: &HttpRequest, etag: &str) -> bool {
    req.headers()
        .get(IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| {
            value.trim() == "*" || value.split(',').map(str::trim).any(|tag| tag == etag)
        })
}
