pub mod auth_gate;
pub mod cards;
pub mod games_create;
pub mod games_read;
