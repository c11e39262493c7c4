//! Game HTTP routes under `/api/games`, behind `JwtExtract`.

use actix_web::http::header::{ETAG, LOCATION};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::db::txn::with_txn;
use crate::domain::{CardId, PileId, TableState};
use crate::error::AppError;
use crate::extractors::{CurrentUser, GameId, ValidatedJson};
use crate::http::etag::{expected_version, game_etag, not_modified};
use crate::repos::games::Game;
use crate::repos::moves::GameMove;
use crate::services::games::{CreateGame, GameService, GameView, MoveRequest};
use crate::state::app_state::AppState;

fn rfc3339(ts: OffsetDateTime) -> String {
    ts.format(&Rfc3339).unwrap_or_default()
}

#[derive(Debug, Serialize)]
struct MoveResponse {
    id: i64,
    user: String,
    cards: Vec<CardId>,
    src: PileId,
    dst: PileId,
    created_at: String,
}

impl From<GameMove> for MoveResponse {
    fn from(mv: GameMove) -> Self {
        Self {
            id: mv.id,
            user: mv.user_sub,
            cards: mv.cards,
            src: mv.source,
            dst: mv.target,
            created_at: rfc3339(mv.created_at),
        }
    }
}

/// Game view returned by every game route.
#[derive(Debug, Serialize)]
struct GameResponse {
    id: i64,
    game: String,
    color: String,
    draw: String,
    state: TableState,
    active: bool,
    won: bool,
    move_count: i32,
    cards_remaining: usize,
    version: i32,
    created_at: String,
    updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    moves: Option<Vec<MoveResponse>>,
}

impl GameResponse {
    fn new(game: Game, moves: Option<Vec<GameMove>>) -> Self {
        Self {
            id: game.id,
            cards_remaining: game.cards_remaining(),
            draw: format!("Draw {}", game.draw.count()),
            game: game.variant,
            color: game.color,
            state: game.table,
            active: game.active,
            won: game.won,
            move_count: game.move_count,
            version: game.lock_version,
            created_at: rfc3339(game.created_at),
            updated_at: rfc3339(game.updated_at),
            moves: moves.map(|moves| moves.into_iter().map(MoveResponse::from).collect()),
        }
    }
}

impl From<GameView> for GameResponse {
    fn from(view: GameView) -> Self {
        Self::new(view.game, view.moves)
    }
}

fn game_reply(status: StatusCode, game: Game) -> HttpResponse {
    let etag = game_etag(game.id, game.lock_version);
    HttpResponse::build(status)
        .insert_header((ETAG, etag))
        .json(GameResponse::new(game, None))
}

#[derive(Debug, Deserialize)]
struct GameQuery {
    moves: Option<String>,
}

impl GameQuery {
    /// `?moves`, `?moves=1` and `?moves=true` all ask for the log.
    fn include_moves(&self) -> bool {
        matches!(self.moves.as_deref(), Some(v) if v != "false" && v != "0")
    }
}

/// POST /api/games
async fn create_game(
    req: HttpRequest,
    user: CurrentUser,
    body: ValidatedJson<CreateGame>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let options = body.into_inner();
    let owner = user.sub;

    let game = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { GameService::new().create_game(txn, &owner, &options).await })
    })
    .await?;

    let location = format!("/api/games/{}", game.id);
    let mut response = game_reply(StatusCode::CREATED, game);
    if let Ok(value) = location.parse() {
        response.headers_mut().insert(LOCATION, value);
    }
    Ok(response)
}

/// GET /api/games/{game_id}
///
/// Open to any authenticated caller. Honors `If-None-Match` with a 304.
async fn get_game(
    req: HttpRequest,
    game_id: GameId,
    query: web::Query<GameQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = game_id.0;
    let include_moves = query.include_moves();

    let view = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { GameService::new().get_game(txn, id, include_moves).await })
    })
    .await?;

    let etag = game_etag(id, view.game.lock_version);
    if not_modified(&req, &etag) {
        return Ok(HttpResponse::NotModified()
            .insert_header((ETAG, etag))
            .finish());
    }

    Ok(HttpResponse::Ok()
        .insert_header((ETAG, etag))
        .json(GameResponse::from(view)))
}

/// PUT /api/games/{game_id}
///
/// Submit one move. The stored table is re-validated; an illegal move is a
/// 400 and changes nothing.
async fn submit_move(
    req: HttpRequest,
    user: CurrentUser,
    game_id: GameId,
    body: ValidatedJson<MoveRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = game_id.0;
    let expected = expected_version(&req)?;
    let request = body.into_inner();
    let sub = user.sub;

    let _guard = app_state.game_locks.acquire(id).await;
    let outcome = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            GameService::new()
                .submit_move(txn, &sub, id, &request, expected)
                .await
        })
    })
    .await?;

    Ok(game_reply(StatusCode::CREATED, outcome.into_result()?))
}

/// POST /api/games/{game_id}/autofinish
async fn auto_finish(
    req: HttpRequest,
    user: CurrentUser,
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = game_id.0;
    let expected = expected_version(&req)?;
    let sub = user.sub;

    let _guard = app_state.game_locks.acquire(id).await;
    let outcome = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { GameService::new().auto_finish(txn, &sub, id, expected).await })
    })
    .await?;

    Ok(game_reply(StatusCode::CREATED, outcome.into_result()?))
}

/// POST /api/games/{game_id}/reset
async fn reset(
    req: HttpRequest,
    user: CurrentUser,
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = game_id.0;
    let expected = expected_version(&req)?;
    let sub = user.sub;

    let _guard = app_state.game_locks.acquire(id).await;
    let game = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { GameService::new().reset(txn, &sub, id, expected).await })
    })
    .await?;

    Ok(game_reply(StatusCode::OK, game))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(create_game)))
        .service(
            web::resource("/{game_id}")
                .route(web::get().to(get_game))
                .route(web::put().to(submit_move)),
        )
        .service(web::resource("/{game_id}/autofinish").route(web::post().to(auto_finish)))
        .service(web::resource("/{game_id}/reset").route(web::post().to(reset)));
}
