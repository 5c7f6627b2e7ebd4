//! Card system: card state and dealing.
//!
//! ## Key Types
//!
//! - `PairKey`: Pairing key (asset identifier) shared by exactly two cards
//! - `Card`: Runtime card state (flipped, matched)
//! - `deal`: Builds and shuffles the deck for a session

pub mod card;
pub mod deck;

pub use card::{Card, PairKey};
pub use deck::deal;
