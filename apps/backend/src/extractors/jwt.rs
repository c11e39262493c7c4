use actix_web::dev::Payload;
use actix_web::http::header::{HeaderValue, AUTHORIZATION};
use actix_web::{web, FromRequest, HttpRequest};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Verified claims of any shape.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JwtClaims<C> {
    pub claims: C,
}

impl<C> JwtClaims<C>
where
    C: for<'de> Deserialize<'de>,
{
    /// Decode `token`, checking signature, algorithm and expiry.
    pub fn verify(token: &str, security: &SecurityConfig) -> Result<Self, AppError> {
        let mut validation = Validation::new(security.algorithm);
        validation.validate_exp = true;
        validation.leeway = 0;

        decode::<C>(
            token,
            &DecodingKey::from_secret(&security.jwt_secret),
            &validation,
        )
        .map(|data| JwtClaims {
            claims: data.claims,
        })
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AppError::unauthorized_expired_jwt(),
            _ => AppError::unauthorized_invalid_jwt(),
        })
    }
}

/// Token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: Option<&HeaderValue>) -> Result<&str, AppError> {
    let value = header
        .and_then(|v| v.to_str().ok())
        .ok_or_else(AppError::unauthorized_missing_bearer)?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Ok(token),
        _ => Err(AppError::unauthorized_missing_bearer()),
    }
}

impl<C> FromRequest for JwtClaims<C>
where
    C: for<'de> Deserialize<'de> + 'static,
{
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let token = bearer_token(req.headers().get(AUTHORIZATION))?;
            let app_state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available"))?;
            JwtClaims::verify(token, &app_state.security)
        })
    }
}
