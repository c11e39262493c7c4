use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::auth::claims::BackendClaims;
use crate::error::AppError;

/// The authenticated caller, taken from claims `JwtExtract` verified.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub sub: String,
    pub email: String,
}

impl From<BackendClaims> for CurrentUser {
    fn from(claims: BackendClaims) -> Self {
        Self {
            sub: claims.sub,
            email: claims.email,
        }
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<BackendClaims>()
                .cloned()
                .map(CurrentUser::from)
                .ok_or_else(AppError::unauthorized_missing_bearer),
        )
    }
}
