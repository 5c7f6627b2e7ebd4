//! Card identification.
//!
//! Every card dealt into a session has a unique `CardId`. The two cards of
//! a pair are allocated together, so the id encodes both the pair index and
//! the side of the pair:
//!
//! - `2 * pair`: side `a`
//! - `2 * pair + 1`: side `b`
//!
//! ## Usage
//!
//! ```
//! use memory_match::core::CardId;
//!
//! let a = CardId::new(3, 0);
//! let b = a.sibling();
//!
//! assert_eq!(a.pair_index(), 3);
//! assert_eq!(b.pair_index(), 3);
//! assert_eq!(a.to_string(), "card-3-a");
//! assert_eq!(b.to_string(), "card-3-b");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card within a session.
///
/// Ids are stable for the lifetime of a session and independent of the
/// shuffled display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create the id for one side (0 or 1) of a pair.
    #[must_use]
    pub const fn new(pair_index: u32, side: u32) -> Self {
        Self(pair_index * 2 + (side & 1))
    }

    /// Index of the pair this card belongs to.
    #[must_use]
    pub const fn pair_index(self) -> u32 {
        self.0 / 2
    }

    /// Side of the pair: 0 for `a`, 1 for `b`.
    #[must_use]
    pub const fn side(self) -> u32 {
        self.0 & 1
    }

    /// The id of the other card allocated for the same pair.
    #[must_use]
    pub const fn sibling(self) -> Self {
        Self(self.0 ^ 1)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let side = if self.side() == 0 { 'a' } else { 'b' };
        write!(f, "card-{}-{}", self.pair_index(), side)
    }
}
