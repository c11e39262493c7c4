//! Cycling the stock through the service keeps the stored table whole.

use klondike_backend::domain::DrawCount;
use klondike_backend::repos::moves;
use klondike_backend::services::games::{GameService, MoveCard, MoveRequest};
use proptest::prelude::*;
use sea_orm::TransactionTrait;

use crate::common::proptest_prelude::proptest_prelude_config;
use crate::support::games::create_game;
use crate::support::test_state::build_test_state;

/// Draw while the stock has cards, recycle when it runs out.
fn next_move(table: &klondike_backend::domain::TableState, draw: DrawCount) -> MoveRequest {
    if table.stock.is_empty() {
        MoveRequest {
            cards: table
                .waste
                .iter()
                .map(|c| MoveCard::Token(c.id().to_string()))
                .collect(),
            src: "discard".to_string(),
            dst: "draw".to_string(),
        }
    } else {
        let take = draw.count().min(table.stock.len());
        MoveRequest {
            cards: table.stock[table.stock.len() - take..]
                .iter()
                .map(|c| MoveCard::Token(c.id().to_string()))
                .collect(),
            src: "draw".to_string(),
            dst: "discard".to_string(),
        }
    }
}

async fn cycle(steps: usize, label: &str) -> Result<(), TestCaseError> {
    let state = build_test_state()
        .await
        .map_err(|e| TestCaseError::fail(e.to_string()))?;
    let mut game = create_game(&state, "sub-cycle", label).await;
    let db = state.db().unwrap();

    for _ in 0..steps {
        let request = next_move(&game.table, game.draw);
        let txn = db.begin().await.unwrap();
        game = GameService::new()
            .submit_move(&txn, "sub-cycle", game.id, &request, Some(game.lock_version))
            .await
            .map_err(|e| TestCaseError::fail(e.to_string()))?
            .into_result()
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        txn.commit().await.unwrap();

        prop_assert_eq!(game.table.card_count(), 52);
        prop_assert!(game.table.check_invariants().is_ok());
        prop_assert!(game.table.stock.iter().all(|c| !c.face_up));
        prop_assert!(game.table.waste.iter().all(|c| c.face_up));
    }

    prop_assert_eq!(game.move_count as usize, steps);
    prop_assert_eq!(
        moves::count_for_game(db, game.id).await.unwrap() as usize,
        steps
    );
    Ok(())
}

proptest! {
    #![proptest_config(proptest_prelude_config())]

    #[test]
    fn prop_stock_cycles_conserve_cards(steps in 1usize..40, three in any::<bool>()) {
        let label = if three { "Draw 3" } else { "Draw 1" };
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(cycle(steps, label))?;
    }
}
