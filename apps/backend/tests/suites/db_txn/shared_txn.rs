use std::sync::Arc;

use actix_web::test::TestRequest;
use actix_web::HttpMessage;
use klondike_backend::db::txn::{with_txn, SharedTxn};
use klondike_backend::domain::{deal_with_seed, DrawCount};
use klondike_backend::repos::games::{self, NewGame};
use sea_orm::TransactionTrait;

use crate::support::test_state::build_test_state;

#[tokio::test]
async fn shared_txn_is_reused_and_left_open() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db().unwrap();

    let shared = SharedTxn(Arc::new(db.begin().await?));
    let req = TestRequest::default().to_http_request();
    req.extensions_mut().insert(shared.clone());

    let id = with_txn(Some(&req), &state, |txn| {
        Box::pin(async move {
            let game = games::create_game(
                txn,
                NewGame {
                    owner_sub: "sub-shared".to_string(),
                    variant: "klondike".to_string(),
                    color: "blue".to_string(),
                    draw: DrawCount::One,
                    rng_seed: 3,
                    table: deal_with_seed(3),
                },
            )
            .await?;
            Ok(game.id)
        })
    })
    .await?;

    // visible inside the still-open transaction
    assert!(games::exists(shared.transaction(), id).await?);

    req.extensions_mut().remove::<SharedTxn>();
    drop(req);
    let txn = Arc::try_unwrap(shared.0).map_err(|_| "shared txn still referenced")?;
    txn.rollback().await?;

    assert!(!games::exists(db, id).await?);
    Ok(())
}
