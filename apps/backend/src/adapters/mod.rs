//! SeaORM adapters. Functions here return `DbErr`; repos map it to `DomainError`.

pub mod games_sea;
pub mod moves_sea;
