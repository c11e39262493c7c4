//! Game fixtures that go through the service layer or repos directly.

use klondike_backend::domain::{Card, Rank, Suit, TableState};
use klondike_backend::repos::games::{self, Game};
use klondike_backend::services::games::{CreateGame, GameService};
use klondike_backend::state::app_state::AppState;
use sea_orm::TransactionTrait;

pub fn klondike_options(draw: &str) -> CreateGame {
    CreateGame {
        game: "Klondike".to_string(),
        color: "Blue".to_string(),
        draw: draw.to_string(),
    }
}

/// Create and commit a game owned by `owner`.
pub async fn create_game(state: &AppState, owner: &str, draw: &str) -> Game {
    let db = state.db().expect("test state has a database");
    let txn = db.begin().await.expect("begin");
    let game = GameService::new()
        .create_game(&txn, owner, &klondike_options(draw))
        .await
        .expect("create game");
    txn.commit().await.expect("commit");
    game
}

/// Overwrite a stored table, keeping the move count.
pub async fn store_table(state: &AppState, game: &Game, table: &TableState) -> Game {
    let db = state.db().expect("test state has a database");
    let txn = db.begin().await.expect("begin");
    let saved = games::save_table(&txn, game, table, game.move_count, None)
        .await
        .expect("save table");
    txn.commit().await.expect("commit");
    saved
}

/// Every card on its foundation except the four Kings, which sit face up
/// on the first four tableau piles.
pub fn kings_left_table() -> TableState {
    let mut table = TableState::default();
    for suit in Suit::ALL {
        let slot = suit.foundation_slot();
        for rank in Rank::ALL.iter().copied().filter(|r| *r != Rank::King) {
            table.foundations[slot].push(Card::up(suit, rank));
        }
        table.tableau[slot].push(Card::up(suit, Rank::King));
    }
    table
}

/// Top card of the stock as a token, e.g. `"7H"`.
pub fn top_of_stock(table: &TableState) -> String {
    table
        .stock
        .last()
        .expect("fresh deal has a stock")
        .id()
        .to_string()
}
