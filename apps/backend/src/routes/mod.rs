use actix_web::web;

use crate::middleware::jwt_extract::JwtExtract;

pub mod cards;
pub mod games;
pub mod health;

/// Register every route. `main.rs` and the test app builder share this, so
/// tests exercise the same scopes and auth gate production serves.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/health").configure(health::configure_routes));

    cfg.service(web::scope("/api/cards").configure(cards::configure_routes));

    cfg.service(
        web::scope("/api/games")
            .wrap(JwtExtract)
            .configure(games::configure_routes),
    );
}
