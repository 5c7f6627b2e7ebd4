//! The game session state machine.
//!
//! A `GameSession` owns the dealt cards and the round state. It is mutated
//! only by `select` and `flip_back`; everything else is a query.
//!
//! ## Resolution
//!
//! When the active selection reaches two cards the move is resolved on the
//! spot: `moves` is incremented and the pairing keys compared.
//!
//! - **Match**: both cards are matched, the gate reopens immediately.
//! - **Mismatch**: the gate stays closed and a `FlipBackTicket` is returned.
//!   The caller redeems it after `MISMATCH_DELAY` to turn the cards back.
//!
//! ## Generations
//!
//! Each session is stamped with a generation number chosen by its owner.
//! Tickets carry it, and `flip_back` rejects tickets from another
//! generation, so a timer outliving its session cannot touch the new one.

use im::Vector;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, info, trace};

use super::outcome::{FlipBackTicket, IgnoreReason, SelectOutcome};
use super::snapshot::{Phase, SessionSnapshot};
use crate::cards::{deal, Card, PairKey};
use crate::core::{CardId, GameRng, GameSettings, Result, ThemeCatalog};

/// A single memory game, from deal to win.
#[derive(Clone, Debug)]
pub struct GameSession {
    generation: u64,
    settings: GameSettings,
    /// Cards in display order.
    cards: Vector<Card>,
    /// Card ID to display position.
    positions: FxHashMap<CardId, usize>,
    /// Face-up, unresolved cards in selection order (0-2).
    selection: SmallVec<[CardId; 2]>,
    moves: u32,
    matched_pairs: usize,
    pair_count: usize,
    can_flip: bool,
    won: bool,
}

impl GameSession {
    /// Deal a new session.
    ///
    /// Fails with a `ConfigError` if the theme is unknown or has fewer
    /// assets than the level needs. No session exists in that case.
    pub fn new(
        settings: &GameSettings,
        catalog: &ThemeCatalog,
        rng: &mut GameRng,
        generation: u64,
    ) -> Result<Self> {
        let pair_count = settings.level.pair_count();
        let assets = catalog.assets_for(&settings.theme, pair_count)?;
        let cards = deal(assets, rng);

        info!(
            generation,
            level = %settings.level,
            theme = %settings.theme,
            pair_count,
            "session started"
        );

        Ok(Self::from_cards(settings.clone(), cards, generation))
    }

    /// Build a session from an already-dealt deck.
    ///
    /// The deck must be non-empty and hold exactly two cards per pairing key.
    #[must_use]
    pub(crate) fn from_cards(settings: GameSettings, cards: Vector<Card>, generation: u64) -> Self {
        debug_assert!(
            !cards.is_empty() && cards.len() % 2 == 0,
            "deck must hold a positive, even number of cards"
        );
        let positions = cards
            .iter()
            .enumerate()
            .map(|(pos, card)| (card.id, pos))
            .collect();
        let pair_count = cards.len() / 2;

        Self {
            generation,
            settings,
            cards,
            positions,
            selection: SmallVec::new(),
            moves: 0,
            matched_pairs: 0,
            pair_count,
            can_flip: true,
            won: false,
        }
    }

    // === Queries ===

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Cards in display order.
    #[must_use]
    pub fn cards(&self) -> &Vector<Card> {
        &self.cards
    }

    /// Look up a card by ID.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.positions.get(&id).and_then(|&pos| self.cards.get(pos))
    }

    /// The active selection, in selection order.
    #[must_use]
    pub fn selection(&self) -> &[CardId] {
        &self.selection
    }

    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.pair_count
    }

    #[must_use]
    pub fn can_flip(&self) -> bool {
        self.can_flip
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.won
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.won {
            Phase::Won
        } else if self.can_flip {
            Phase::Playing
        } else {
            Phase::Resolving
        }
    }

    /// IDs of the cards `select` would currently accept, in display order.
    #[must_use]
    pub fn legal_selections(&self) -> Vec<CardId> {
        if !self.phase().accepts_input() || self.selection.len() >= 2 {
            return vec![];
        }
        self.cards
            .iter()
            .filter(|c| c.is_selectable())
            .map(|c| c.id)
            .collect()
    }

    /// Take a read-only view of the session.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            generation: self.generation,
            level: self.settings.level,
            theme: self.settings.theme.clone(),
            phase: self.phase(),
            cards: self.cards.clone(),
            moves: self.moves,
            matched_pairs: self.matched_pairs,
            pair_count: self.pair_count,
            won: self.won,
            can_flip: self.can_flip,
        }
    }

    // === Commands ===

    /// Turn a card face-up.
    ///
    /// Illegal selections are ignored and leave the session untouched.
    /// Selecting the second card resolves the move.
    pub fn select(&mut self, id: CardId) -> SelectOutcome {
        if let Some(reason) = self.check_select(id) {
            trace!(generation = self.generation, card = %id, ?reason, "selection ignored");
            return SelectOutcome::Ignored(reason);
        }

        if let Some(card) = self.card_mut(id) {
            card.is_flipped = true;
        }
        self.selection.push(id);

        if self.selection.len() == 2 {
            return self.resolve();
        }

        debug!(generation = self.generation, card = %id, "card revealed");
        SelectOutcome::Revealed
    }

    /// Turn a mismatched pair back face-down and reopen the gate.
    ///
    /// Returns false, changing nothing, if the ticket belongs to another
    /// generation or does not describe the pending mismatch.
    pub fn flip_back(&mut self, ticket: &FlipBackTicket) -> bool {
        if ticket.generation != self.generation {
            trace!(
                generation = self.generation,
                ticket_generation = ticket.generation,
                "stale flip-back ignored"
            );
            return false;
        }

        if self.can_flip || self.won || self.selection.as_slice() != &ticket.cards[..] {
            trace!(generation = self.generation, "no pending mismatch for flip-back");
            return false;
        }

        for id in ticket.cards {
            if let Some(card) = self.card_mut(id) {
                card.is_flipped = false;
            }
        }
        self.selection.clear();
        self.can_flip = true;

        debug!(generation = self.generation, "mismatch flipped back");
        true
    }

    // === Internals ===

    fn check_select(&self, id: CardId) -> Option<IgnoreReason> {
        if !self.can_flip {
            return Some(IgnoreReason::Locked);
        }
        let Some(card) = self.card(id) else {
            return Some(IgnoreReason::UnknownCard);
        };
        if card.is_matched {
            return Some(IgnoreReason::AlreadyMatched);
        }
        if card.is_flipped {
            return Some(IgnoreReason::AlreadyFlipped);
        }
        if self.selection.len() >= 2 {
            return Some(IgnoreReason::SelectionFull);
        }
        None
    }

    fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        let pos = *self.positions.get(&id)?;
        self.cards.get_mut(pos)
    }

    fn resolve(&mut self) -> SelectOutcome {
        self.can_flip = false;
        self.moves += 1;

        let [first, second] = [self.selection[0], self.selection[1]];
        let matched_key = match (self.card(first), self.card(second)) {
            (Some(a), Some(b)) if a.pairs_with(b) => Some(a.pair_key.clone()),
            _ => None,
        };

        match matched_key {
            Some(key) => self.resolve_match(&key),
            None => {
                debug!(
                    generation = self.generation,
                    first = %first,
                    second = %second,
                    moves = self.moves,
                    "mismatch"
                );
                SelectOutcome::Mismatched(FlipBackTicket {
                    generation: self.generation,
                    cards: [first, second],
                })
            }
        }
    }

    fn resolve_match(&mut self, key: &PairKey) -> SelectOutcome {
        // Every unmatched card with this key; a well-formed deck has exactly two
        for card in self.cards.iter_mut() {
            if !card.is_matched && &card.pair_key == key {
                card.is_matched = true;
                card.is_flipped = true;
            }
        }
        self.matched_pairs += 1;
        self.selection.clear();
        self.can_flip = true;

        debug!(
            generation = self.generation,
            pair = %key,
            matched_pairs = self.matched_pairs,
            moves = self.moves,
            "pair matched"
        );

        if self.matched_pairs == self.pair_count {
            self.won = true;
            self.can_flip = false;
            info!(generation = self.generation, moves = self.moves, "game won");
        }

        SelectOutcome::Matched { won: self.won }
    }
}
