//! Card parsing from two-character tokens (e.g., "AS", "TH", "2C")

use std::fmt;
use std::str::FromStr;

use super::cards_types::{CardId, Rank, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

impl Rank {
    pub const fn as_char(self) -> char {
        match self {
            Rank::Ace => 'A',
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
        }
    }

    fn from_char(c: char) -> Option<Rank> {
        Rank::ALL.into_iter().find(|r| r.as_char() == c)
    }
}

impl Suit {
    pub const fn as_char(self) -> char {
        match self {
            Suit::Spades => 'S',
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
        }
    }

    fn from_char(c: char) -> Option<Suit> {
        Suit::ALL.into_iter().find(|s| s.as_char() == c)
    }
}

fn parse_error(token: &str) -> DomainError {
    DomainError::validation(ValidationKind::ParseCard, format!("Parse card: {token}"))
}

impl FromStr for CardId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(rank_ch), Some(suit_ch), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(parse_error(s));
        };
        let rank = Rank::from_char(rank_ch.to_ascii_uppercase()).ok_or_else(|| parse_error(s))?;
        let suit = Suit::from_char(suit_ch.to_ascii_uppercase()).ok_or_else(|| parse_error(s))?;
        Ok(CardId::new(suit, rank))
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.as_char(), self.suit.as_char())
    }
}

/// Parse a list of card tokens, failing on the first invalid one.
pub fn try_parse_card_ids<I, S>(tokens: I) -> Result<Vec<CardId>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|s| s.as_ref().parse::<CardId>())
        .collect()
}
