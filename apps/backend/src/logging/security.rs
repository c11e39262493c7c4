use tracing::warn;

use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// A bearer token was presented but refused.
pub fn token_rejected(reason: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_TOKEN_REJECTED",
        %trace_id,
        reason,
        "Authentication failure"
    );
}

/// An authenticated caller tried to change a game they do not own.
pub fn foreign_game_access(sub: &str, game_id: i64) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_FOREIGN_GAME_ACCESS",
        %trace_id,
        sub = %Redacted(sub),
        game_id,
        "Caller does not own game"
    );
}
