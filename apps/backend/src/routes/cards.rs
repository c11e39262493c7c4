//! Deterministic deck and deal endpoints for clients and test harnesses.
//! Not authenticated; nothing is stored.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::dealing::new_shuffled_deck;
use crate::domain::{deal_with_seed, fresh_seed, Card, TableState};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
struct SeedQuery {
    seed: Option<u64>,
}

impl SeedQuery {
    fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(fresh_seed)
    }
}

#[derive(Debug, Serialize)]
struct ShuffleResponse {
    seed: u64,
    cards: Vec<Card>,
}

#[derive(Debug, Serialize)]
struct InitialResponse {
    seed: u64,
    state: TableState,
}

/// GET /api/cards/shuffle
async fn shuffle(query: web::Query<SeedQuery>) -> Result<HttpResponse, AppError> {
    let seed = query.seed();
    Ok(HttpResponse::Ok().json(ShuffleResponse {
        seed,
        cards: new_shuffled_deck(seed),
    }))
}

/// GET /api/cards/initial
async fn initial(query: web::Query<SeedQuery>) -> Result<HttpResponse, AppError> {
    let seed = query.seed();
    Ok(HttpResponse::Ok().json(InitialResponse {
        seed,
        state: deal_with_seed(seed),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/shuffle", web::get().to(shuffle))
        .route("/initial", web::get().to(initial));
}
