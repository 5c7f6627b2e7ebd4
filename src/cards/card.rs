//! Card state.
//!
//! A `Card` is one face of the grid. It carries its pairing key (shared
//! with exactly one partner) and two flags:
//!
//! - `is_flipped`: face-up, pending or resolved
//! - `is_matched`: permanently resolved
//!
//! A matched card is always flipped as well.

use serde::{Deserialize, Serialize};

use crate::core::CardId;

/// Pairing key. Two cards match iff their keys are equal.
///
/// The key is the asset identifier the pair was dealt from.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairKey(pub String);

impl PairKey {
    /// Create a new pairing key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PairKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A card on the board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Unique ID within the session.
    pub id: CardId,

    /// Shared with exactly one other card in the session.
    pub pair_key: PairKey,

    /// Image shown when face-up.
    pub image: String,

    /// Currently face-up (pending resolution or matched).
    pub is_flipped: bool,

    /// Permanently face-up.
    pub is_matched: bool,
}

impl Card {
    /// Create a face-down card for an asset.
    #[must_use]
    pub fn new(id: CardId, asset: &str) -> Self {
        Self {
            id,
            pair_key: PairKey::new(asset),
            image: asset.to_string(),
            is_flipped: false,
            is_matched: false,
        }
    }

    /// Should the card be drawn face-up?
    #[must_use]
    pub fn is_face_up(&self) -> bool {
        self.is_flipped || self.is_matched
    }

    /// Can the card be selected, ignoring the session-wide gate?
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        !self.is_flipped && !self.is_matched
    }

    /// The image to display: the front if face-up, else `card_back`.
    #[must_use]
    pub fn visible_image<'a>(&'a self, card_back: &'a str) -> &'a str {
        if self.is_face_up() {
            &self.image
        } else {
            card_back
        }
    }

    /// Do the two cards form a pair?
    #[must_use]
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.id != other.id && self.pair_key == other.pair_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_card_is_face_down() {
        let card = Card::new(CardId::new(0, 0), "./images/space/ufo.png");
        assert!(!card.is_flipped);
        assert!(!card.is_matched);
        assert!(!card.is_face_up());
        assert!(card.is_selectable());
        assert_eq!(card.pair_key.as_str(), card.image);
    }

    #[test]
    fn test_visible_image() {
        let mut card = Card::new(CardId::new(0, 0), "front.png");
        assert_eq!(card.visible_image("back.png"), "back.png");

        card.is_flipped = true;
        assert_eq!(card.visible_image("back.png"), "front.png");

        card.is_flipped = false;
        card.is_matched = true;
        assert_eq!(card.visible_image("back.png"), "front.png");
        assert!(!card.is_selectable());
    }

    #[test]
    fn test_pairs_with() {
        let a = Card::new(CardId::new(1, 0), "lion");
        let b = Card::new(CardId::new(1, 1), "lion");
        let c = Card::new(CardId::new(2, 0), "whale");

        assert!(a.pairs_with(&b));
        assert!(b.pairs_with(&a));
        assert!(!a.pairs_with(&c));
        // A card never pairs with itself
        assert!(!a.pairs_with(&a));
    }
}
