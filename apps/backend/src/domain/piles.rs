//! Pile addressing.
//!
//! Internally piles are addressed by [`PileId`] with zero-based indices.
//! The stored document and the HTTP boundary use the names `draw`,
//! `discard`, `stack1`..`stack4` and `pile1`..`pile7`; conversion happens
//! only through `FromStr`/`Display` here.

use std::fmt;
use std::str::FromStr;

use lazy_regex::regex_captures;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::domain::{DomainError, ValidationKind};

pub const FOUNDATION_COUNT: usize = 4;
pub const TABLEAU_COUNT: usize = 7;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PileId {
    Stock,
    Waste,
    Foundation(usize),
    Tableau(usize),
}

impl PileId {
    pub fn all() -> impl Iterator<Item = PileId> {
        [PileId::Stock, PileId::Waste]
            .into_iter()
            .chain((0..FOUNDATION_COUNT).map(PileId::Foundation))
            .chain((0..TABLEAU_COUNT).map(PileId::Tableau))
    }

    pub fn is_tableau(self) -> bool {
        matches!(self, PileId::Tableau(_))
    }

    pub fn is_foundation(self) -> bool {
        matches!(self, PileId::Foundation(_))
    }

    pub fn is_valid(self) -> bool {
        match self {
            PileId::Stock | PileId::Waste => true,
            PileId::Foundation(i) => i < FOUNDATION_COUNT,
            PileId::Tableau(i) => i < TABLEAU_COUNT,
        }
    }
}

impl fmt::Display for PileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PileId::Stock => f.write_str("draw"),
            PileId::Waste => f.write_str("discard"),
            PileId::Foundation(i) => write!(f, "stack{}", i + 1),
            PileId::Tableau(i) => write!(f, "pile{}", i + 1),
        }
    }
}

impl FromStr for PileId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid =
            || DomainError::validation(ValidationKind::InvalidPile, format!("Unknown pile: {s}"));

        match s {
            "draw" => return Ok(PileId::Stock),
            "discard" => return Ok(PileId::Waste),
            _ => {}
        }

        let (_, kind, number) = regex_captures!(r"^(pile|stack)([1-9])$", s).ok_or_else(invalid)?;
        let index = number.parse::<usize>().map_err(|_| invalid())? - 1;
        let pile = match kind {
            "pile" => PileId::Tableau(index),
            _ => PileId::Foundation(index),
        };
        if pile.is_valid() {
            Ok(pile)
        } else {
            Err(invalid())
        }
    }
}

impl Serialize for PileId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PileId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<PileId>()
            .map_err(|_| serde::de::Error::custom(format!("Invalid pile: {s}")))
    }
}
