use std::cell::Cell;
use std::rc::Rc;

use klondike_backend::db::txn::with_txn;
use klondike_backend::db::txn_policy::{current, TxnPolicy};
use klondike_backend::domain::{deal_with_seed, DrawCount};
use klondike_backend::errors::ErrorCode;
use klondike_backend::infra::state::build_state;
use klondike_backend::repos::games::{self, NewGame};
use klondike_backend::AppError;

use crate::support::test_state::build_test_state;

fn new_game(owner: &str) -> NewGame {
    NewGame {
        owner_sub: owner.to_string(),
        variant: "klondike".to_string(),
        color: "green".to_string(),
        draw: DrawCount::One,
        rng_seed: 11,
        table: deal_with_seed(11),
    }
}

#[tokio::test]
async fn ok_commits_under_default_policy() -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!(current(), TxnPolicy::CommitOnOk);
    let state = build_test_state().await?;

    let id = with_txn(None, &state, |txn| {
        Box::pin(async move { Ok(games::create_game(txn, new_game("sub-commit")).await?.id) })
    })
    .await?;

    let db = state.db().unwrap();
    assert!(games::exists(db, id).await?);
    Ok(())
}

#[tokio::test]
async fn err_rolls_back_and_returns_the_error() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;

    let created = Rc::new(Cell::new(None));
    let result: Result<(), AppError> = with_txn(None, &state, |txn| {
        let created = Rc::clone(&created);
        Box::pin(async move {
            let game = games::create_game(txn, new_game("sub-rollback")).await?;
            created.set(Some(game.id));
            Err(AppError::internal("forced failure"))
        })
    })
    .await;

    let err = result.unwrap_err();
    assert_eq!(err.code(), ErrorCode::Internal);

    let id = created.get().expect("insert ran before the failure");
    let db = state.db().unwrap();
    assert!(!games::exists(db, id).await?);
    Ok(())
}

#[tokio::test]
async fn no_database_is_503() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state().build().await?;

    let err = with_txn(None, &state, |_txn| Box::pin(async { Ok(()) }))
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::DbUnavailable);
    assert_eq!(err.status().as_u16(), 503);
    Ok(())
}
