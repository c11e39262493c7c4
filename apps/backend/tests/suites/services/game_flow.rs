use klondike_backend::domain::{DrawCount, Rejection};
use klondike_backend::errors::ErrorCode;
use klondike_backend::repos::{games, moves};
use klondike_backend::services::games::{GameService, MoveCard, MoveOutcome, MoveRequest};
use sea_orm::TransactionTrait;

use crate::support::games::{create_game, kings_left_table, store_table, top_of_stock};
use crate::support::test_state::build_test_state;

fn draw_request(cards: Vec<String>) -> MoveRequest {
    MoveRequest {
        cards: cards.into_iter().map(MoveCard::Token).collect(),
        src: "draw".to_string(),
        dst: "discard".to_string(),
    }
}

#[tokio::test]
async fn create_game_stores_a_fresh_deal() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let game = create_game(&state, "sub-a", "Draw 3").await;

    assert_eq!(game.owner_sub, "sub-a");
    assert_eq!(game.variant, "klondike");
    assert_eq!(game.color, "blue");
    assert_eq!(game.draw, DrawCount::Three);
    assert_eq!(game.lock_version, 1);
    assert_eq!(game.move_count, 0);
    assert!(game.active && !game.won);
    assert_eq!(game.table.card_count(), 52);
    assert!(game.table.check_invariants().is_ok());

    let db = state.db().unwrap();
    let stored = games::require_game(db, game.id).await?;
    assert_eq!(stored.table, game.table);
    assert_eq!(stored.rng_seed, game.rng_seed);
    Ok(())
}

#[tokio::test]
async fn accepted_move_bumps_version_and_logs() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let game = create_game(&state, "sub-a", "Draw 1").await;
    let db = state.db().unwrap();

    let txn = db.begin().await?;
    let outcome = GameService::new()
        .submit_move(
            &txn,
            "sub-a",
            game.id,
            &draw_request(vec![top_of_stock(&game.table)]),
            Some(1),
        )
        .await?;
    txn.commit().await?;

    let MoveOutcome::Accepted { game: saved } = outcome else {
        panic!("draw should be accepted");
    };
    assert_eq!(saved.lock_version, 2);
    assert_eq!(saved.move_count, 1);
    assert_eq!(saved.table.waste.len(), 1);
    assert_eq!(moves::count_for_game(db, game.id).await?, 1);
    Ok(())
}

#[tokio::test]
async fn draw_three_takes_the_top_three() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let game = create_game(&state, "sub-a", "Draw 3").await;
    let db = state.db().unwrap();

    let top_three: Vec<String> = game.table.stock[game.table.stock.len() - 3..]
        .iter()
        .map(|c| c.id().to_string())
        .collect();

    let txn = db.begin().await?;
    let one = GameService::new()
        .submit_move(&txn, "sub-a", game.id, &draw_request(top_three[2..].to_vec()), None)
        .await?;
    assert!(matches!(one, MoveOutcome::Rejected(Rejection::Illegal { .. })));

    let three = GameService::new()
        .submit_move(&txn, "sub-a", game.id, &draw_request(top_three.clone()), None)
        .await?;
    txn.commit().await?;

    let saved = three.into_result()?;
    assert_eq!(saved.table.stock.len(), 21);
    assert_eq!(saved.table.waste.len(), 3);
    assert!(saved.table.waste.iter().all(|c| c.face_up));
    // last drawn lands on top
    assert_eq!(saved.table.waste.last().unwrap().id().to_string(), top_three[0]);
    Ok(())
}

#[tokio::test]
async fn move_log_keeps_the_applied_card_order() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let game = create_game(&state, "sub-a", "Draw 3").await;
    let db = state.db().unwrap();

    let stock = &game.table.stock;
    let n = stock.len();
    // named out of pile order: middle, top, bottom
    let scrambled: Vec<String> = [n - 2, n - 1, n - 3]
        .iter()
        .map(|&i| stock[i].id().to_string())
        .collect();

    let txn = db.begin().await?;
    let outcome = GameService::new()
        .submit_move(&txn, "sub-a", game.id, &draw_request(scrambled), None)
        .await?;
    txn.commit().await?;
    let saved = outcome.into_result()?;

    let log = moves::list_for_game(db, game.id).await?;
    assert_eq!(log.len(), 1);
    // replaying the logged cards onto an empty waste rebuilds the stored waste
    let waste: Vec<_> = saved.table.waste.iter().map(|c| c.id()).collect();
    assert_eq!(log[0].cards, waste);
    assert_eq!(log[0].cards[0], stock[n - 1].id());
    Ok(())
}

#[tokio::test]
async fn rejection_leaves_the_game_untouched() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let game = create_game(&state, "sub-a", "Draw 1").await;
    let db = state.db().unwrap();

    let request = MoveRequest {
        cards: vec![MoveCard::Token(top_of_stock(&game.table))],
        src: "draw".to_string(),
        dst: "pile1".to_string(),
    };

    let txn = db.begin().await?;
    let first = GameService::new()
        .submit_move(&txn, "sub-a", game.id, &request, None)
        .await?;
    let second = GameService::new()
        .submit_move(&txn, "sub-a", game.id, &request, None)
        .await?;
    txn.commit().await?;

    assert!(matches!(first, MoveOutcome::Rejected(Rejection::IllegalRoute { .. })));
    assert_eq!(first, second);

    let stored = games::require_game(db, game.id).await?;
    assert_eq!(stored.lock_version, 1);
    assert_eq!(stored.table, game.table);
    assert_eq!(moves::count_for_game(db, game.id).await?, 0);
    Ok(())
}

#[tokio::test]
async fn stale_version_and_foreign_owner_are_refused() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let game = create_game(&state, "sub-a", "Draw 1").await;
    let db = state.db().unwrap();
    let request = draw_request(vec![top_of_stock(&game.table)]);

    let txn = db.begin().await?;
    let stale = GameService::new()
        .submit_move(&txn, "sub-a", game.id, &request, Some(5))
        .await
        .unwrap_err();
    assert_eq!(stale.code(), ErrorCode::OptimisticLock);

    let foreign = GameService::new()
        .submit_move(&txn, "sub-b", game.id, &request, None)
        .await
        .unwrap_err();
    assert_eq!(foreign.code(), ErrorCode::Forbidden);

    let missing = GameService::new()
        .submit_move(&txn, "sub-a", game.id + 1000, &request, None)
        .await
        .unwrap_err();
    assert_eq!(missing.code(), ErrorCode::GameNotFound);
    txn.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn auto_finish_logs_each_card_and_wins() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let game = create_game(&state, "sub-a", "Draw 1").await;
    let game = store_table(&state, &game, &kings_left_table()).await;
    let db = state.db().unwrap();

    let txn = db.begin().await?;
    let won = GameService::new()
        .auto_finish(&txn, "sub-a", game.id, Some(game.lock_version))
        .await?
        .into_result()?;
    txn.commit().await?;

    assert!(won.won);
    assert!(!won.active);
    assert_eq!(won.cards_remaining(), 0);
    assert_eq!(won.move_count, 4);
    assert!(won.table.foundations.iter().all(|f| f.len() == 13));

    let log = moves::list_for_game(db, game.id).await?;
    assert_eq!(log.len(), 4);
    assert!(log.iter().all(|m| m.target.is_foundation() && m.cards.len() == 1));

    let txn = db.begin().await?;
    let finished = GameService::new()
        .submit_move(&txn, "sub-a", game.id, &draw_request(vec!["KS".into()]), None)
        .await
        .unwrap_err();
    assert_eq!(finished.code(), ErrorCode::GameFinished);
    txn.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn reset_reopens_a_won_game() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let game = create_game(&state, "sub-a", "Draw 1").await;
    let game = store_table(&state, &game, &kings_left_table()).await;
    let db = state.db().unwrap();

    let txn = db.begin().await?;
    GameService::new()
        .auto_finish(&txn, "sub-a", game.id, None)
        .await?
        .into_result()?;
    let fresh = GameService::new().reset(&txn, "sub-a", game.id, None).await?;
    txn.commit().await?;

    assert!(fresh.active);
    assert!(!fresh.won);
    assert_eq!(fresh.move_count, 0);
    assert_eq!(fresh.table.stock.len(), 24);
    assert_eq!(moves::count_for_game(db, game.id).await?, 0);
    Ok(())
}

#[tokio::test]
async fn get_game_optionally_includes_moves() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let game = create_game(&state, "sub-a", "Draw 1").await;
    let db = state.db().unwrap();

    let txn = db.begin().await?;
    GameService::new()
        .submit_move(
            &txn,
            "sub-a",
            game.id,
            &draw_request(vec![top_of_stock(&game.table)]),
            None,
        )
        .await?
        .into_result()?;
    txn.commit().await?;

    let bare = GameService::new().get_game(db, game.id, false).await?;
    assert!(bare.moves.is_none());

    let full = GameService::new().get_game(db, game.id, true).await?;
    let log = full.moves.unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].user_sub, "sub-a");
    assert_eq!(full.game.move_count, 1);
    Ok(())
}
