//! Claims the `JwtExtract` middleware stores in request extensions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BackendClaims {
    /// Stable user identifier; games are owned by it
    pub sub: String,
    pub email: String,
    /// Expiry (seconds since epoch)
    pub exp: usize,
}
