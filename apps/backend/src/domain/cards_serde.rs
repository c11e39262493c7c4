//! Serialization and deserialization for card types

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::cards_types::{Card, CardId};

// CardId serde (compact 2-character format like "AS", "TH")
impl Serialize for CardId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CardId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<CardId>()
            .map_err(|_| serde::de::Error::custom(format!("Invalid card: {s}")))
    }
}

/// Stored shape of a card in a pile: `{"id": "TH", "up": true}`.
#[derive(Serialize, Deserialize)]
struct CardRepr {
    id: CardId,
    up: bool,
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        CardRepr {
            id: self.id(),
            up: self.face_up,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = CardRepr::deserialize(deserializer)?;
        Ok(Card {
            suit: repr.id.suit,
            rank: repr.id.rank,
            face_up: repr.up,
        })
    }
}
