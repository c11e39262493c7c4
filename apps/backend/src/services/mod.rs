//! Services: validate-then-persist operations over repos.

pub mod game_locks;
pub mod games;
