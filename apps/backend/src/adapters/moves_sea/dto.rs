//! DTOs for moves_sea adapter.

/// One accepted move. `cards` is a JSON array of card tokens; `src` and
/// `dst` are boundary pile names.
#[derive(Debug, Clone)]
pub struct MoveCreate {
    pub game_id: i64,
    pub user_sub: String,
    pub cards: String,
    pub src: String,
    pub dst: String,
}
