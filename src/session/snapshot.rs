//! Read-only session views for the presentation layer.
//!
//! Snapshots share the card vector with the session (`im::Vector`), so
//! taking one after every event is O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::{CardId, GameSettings, Level, ThemeId};

/// Where the session is in its lifecycle.
///
/// `NotStarted → Playing → Resolving → Playing → … → Won`. Matches resolve
/// instantly, so `Resolving` is only observed while a mismatch is on display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No session: the settings screen is up.
    NotStarted,
    /// Accepting selections.
    Playing,
    /// A mismatch is on display; selections are ignored.
    Resolving,
    /// Every pair found. Terminal until a new session starts.
    Won,
}

impl Phase {
    /// Does this phase accept card selections?
    #[must_use]
    pub fn accepts_input(self) -> bool {
        self == Phase::Playing
    }
}

/// Immutable view of a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Generation of the session this was taken from (0 when not started).
    pub generation: u64,
    pub level: Level,
    pub theme: ThemeId,
    pub phase: Phase,
    /// Cards in display order.
    pub cards: Vector<Card>,
    pub moves: u32,
    pub matched_pairs: usize,
    pub pair_count: usize,
    pub won: bool,
    pub can_flip: bool,
}

impl SessionSnapshot {
    /// Snapshot for the settings screen, before any session exists.
    #[must_use]
    pub fn not_started(settings: &GameSettings) -> Self {
        Self {
            generation: 0,
            level: settings.level,
            theme: settings.theme.clone(),
            phase: Phase::NotStarted,
            cards: Vector::new(),
            moves: 0,
            matched_pairs: 0,
            pair_count: settings.level.pair_count(),
            won: false,
            can_flip: false,
        }
    }

    /// Look up a card by ID.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Card at a display position.
    #[must_use]
    pub fn card_at(&self, position: usize) -> Option<&Card> {
        self.cards.get(position)
    }

    /// Number of cards with `is_matched` set.
    #[must_use]
    pub fn matched_card_count(&self) -> usize {
        self.cards.iter().filter(|c| c.is_matched).count()
    }

    /// Cards currently face-up but unresolved.
    pub fn pending_cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|c| c.is_flipped && !c.is_matched)
    }

    /// Move and match counters, e.g. `"Moves: 3 | Matches: 1 / 4"`.
    #[must_use]
    pub fn status_line(&self) -> String {
        format!(
            "Moves: {} | Matches: {} / {}",
            self.moves, self.matched_pairs, self.pair_count
        )
    }

    /// Closing message once the game is won.
    #[must_use]
    pub fn win_message(&self) -> Option<String> {
        self.won
            .then(|| format!("You completed the game in {} moves.", self.moves))
    }
}
