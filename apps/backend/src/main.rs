use actix_web::{web, App, HttpServer};
use klondike_backend::config::db::{DbKind, RuntimeEnv};
use klondike_backend::infra::state::build_state;
use klondike_backend::middleware::cors::cors_middleware;
use klondike_backend::middleware::request_trace::RequestTrace;
use klondike_backend::middleware::structured_logger::StructuredLogger;
use klondike_backend::middleware::trace_span::TraceSpan;
use klondike_backend::routes;
use klondike_backend::state::security_config::SecurityConfig;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Configuration comes from the process environment only
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = match std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
    {
        Ok(port) => port,
        Err(_) => {
            error!("BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        }
    };

    let jwt = match std::env::var("BACKEND_JWT_SECRET") {
        Ok(jwt) if !jwt.is_empty() => jwt,
        _ => {
            error!("BACKEND_JWT_SECRET must be set");
            std::process::exit(1);
        }
    };
    let security_config = SecurityConfig::new(jwt.as_bytes());

    let db_kind = match std::env::var("BACKEND_DB_KIND")
        .unwrap_or_else(|_| "postgres".to_string())
        .parse::<DbKind>()
    {
        Ok(kind) => kind,
        Err(e) => {
            error!(error = %e, "Invalid BACKEND_DB_KIND");
            std::process::exit(1);
        }
    };

    let app_state = match build_state()
        .with_env(RuntimeEnv::Prod)
        .with_db(db_kind)
        .with_security(security_config)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to build application state");
            std::process::exit(1);
        }
    };

    info!(%host, port, ?db_kind, "Starting Klondike backend");

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
