//! DTOs for games_sea adapter.

/// New game row. `state` is the serialized pile document.
#[derive(Debug, Clone)]
pub struct GameCreate {
    pub owner_sub: String,
    pub variant: String,
    pub color: String,
    pub draw_count: i16,
    pub rng_seed: i64,
    pub state: String,
}

impl GameCreate {
    pub fn new(owner_sub: impl Into<String>, state: impl Into<String>, rng_seed: i64) -> Self {
        Self {
            owner_sub: owner_sub.into(),
            variant: "klondike".to_string(),
            color: "blue".to_string(),
            draw_count: 1,
            rng_seed,
            state: state.into(),
        }
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = variant.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_draw_count(mut self, draw_count: i16) -> Self {
        self.draw_count = draw_count;
        self
    }
}

/// Table update guarded by `expected_version`.
///
/// `rng_seed` is set on reset; `move_count` is the new absolute count.
#[derive(Debug, Clone)]
pub struct GameTableUpdate {
    pub id: i64,
    pub state: String,
    pub move_count: i32,
    pub won: bool,
    pub rng_seed: Option<i64>,
    pub expected_version: i32,
}

impl GameTableUpdate {
    pub fn new(id: i64, expected_version: i32, state: impl Into<String>) -> Self {
        Self {
            id,
            state: state.into(),
            move_count: 0,
            won: false,
            rng_seed: None,
            expected_version,
        }
    }

    pub fn with_move_count(mut self, move_count: i32) -> Self {
        self.move_count = move_count;
        self
    }

    pub fn with_won(mut self, won: bool) -> Self {
        self.won = won;
        self
    }

    pub fn with_rng_seed(mut self, rng_seed: i64) -> Self {
        self.rng_seed = Some(rng_seed);
        self
    }
}
