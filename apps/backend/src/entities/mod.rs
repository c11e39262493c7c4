pub mod game_moves;
pub mod games;

pub use game_moves::Entity as GameMoves;
pub use game_moves::Model as GameMove;
pub use games::Entity as Games;
pub use games::Model as Game;
