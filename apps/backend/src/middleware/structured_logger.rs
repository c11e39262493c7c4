//! Access log. One `request_completed` event per request, tagged with the
//! game it touched and the version the response carried.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::ETAG;
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{event, Level};

use crate::http::etag::parse_game_version_from_etag;

const GAMES_PREFIX: &str = "/api/games/";

/// Game id named by a `/api/games/{id}[/...]` path.
fn game_id_from_path(path: &str) -> Option<i64> {
    let rest = path.strip_prefix(GAMES_PREFIX)?;
    rest.split('/').next()?.parse().ok()
}

/// Server faults are errors and client faults warnings. A 409 is a lost
/// version race between two tabs and stays at info.
fn completion_level(status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::ERROR
    } else if status.is_client_error() && status != StatusCode::CONFLICT {
        Level::WARN
    } else {
        Level::INFO
    }
}

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        // the pattern keeps game ids out of the route field
        let route = req
            .match_pattern()
            .unwrap_or_else(|| req.path().to_string());
        let game_id = game_id_from_path(req.path());
        let trace_id = req
            .extensions()
            .get::<String>()
            .cloned()
            .unwrap_or_else(|| "unknown".to_string());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let (status, game_version) = match &result {
                Ok(res) => (
                    res.status(),
                    res.headers()
                        .get(ETAG)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|v| parse_game_version_from_etag(v).ok()),
                ),
                Err(err) => (err.as_response_error().status_code(), None),
            };
            let duration_us = start.elapsed().as_micros() as u64;

            macro_rules! completed {
                ($level:expr) => {
                    event!(
                        $level,
                        http.method = %method,
                        http.route = %route,
                        http.status_code = status.as_u16(),
                        game_id,
                        game_version,
                        duration_us,
                        trace_id = %trace_id,
                        "request_completed"
                    )
                };
            }

            let level = completion_level(status);
            if level == Level::ERROR {
                completed!(Level::ERROR);
            } else if level == Level::WARN {
                completed!(Level::WARN);
            } else {
                completed!(Level::INFO);
            }

            result
        })
    }
}
