//! # memory-match
//!
//! A single-player memory-matching game engine: a grid of face-down cards,
//! two revealed at a time, matching pairs stay face-up, the game ends when
//! every pair is found.
//!
//! ## Design Principles
//!
//! 1. **Pure State Machine**: `GameSession` owns the cards and round state
//!    and is mutated only by explicit commands. No rendering, no I/O.
//!
//! 2. **Permissive Input**: Illegal selections are silently ignored. The
//!    only error is a `ConfigError` when a session cannot be dealt.
//!
//! 3. **Generation-Tagged Timers**: Mismatch recovery is a deferred event
//!    tied to the session that scheduled it. A superseded session's timer
//!    is cancelled and, if it fires anyway, ignored.
//!
//! ## Example
//!
//! ```
//! use memory_match::{CardId, GameRng, Level, ManualClock, MemoryGame, Phase, ThemeCatalog};
//!
//! let clock = ManualClock::new();
//! let mut game = MemoryGame::with_parts(ThemeCatalog::builtin(), GameRng::new(42), clock);
//!
//! let snapshot = game.start_session(Level::Beginner, "animals").unwrap();
//! assert_eq!(snapshot.cards.len(), 8);
//!
//! // The two cards of pair 0 always match, wherever the shuffle put them
//! game.select_card(CardId::new(0, 0));
//! let snapshot = game.select_card(CardId::new(0, 1));
//! assert_eq!(snapshot.matched_pairs, 1);
//! assert_eq!(snapshot.moves, 1);
//! assert_eq!(snapshot.phase, Phase::Playing);
//! ```
//!
//! ## Modules
//!
//! - `core`: Card IDs, RNG, levels, themes, configuration errors
//! - `cards`: Card state and dealing
//! - `session`: The `GameSession` state machine and its snapshots
//! - `game`: The `MemoryGame` controller, mismatch timer and clocks

pub mod core;
pub mod cards;
pub mod session;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    CardId,
    GameRng,
    GameSettings, Level, Theme, ThemeCatalog, ThemeId,
    ConfigError, CARD_BACK_IMAGE, MISMATCH_DELAY,
};

pub use crate::cards::{Card, PairKey};

pub use crate::session::{
    FlipBackTicket, GameSession, IgnoreReason, Phase, SelectOutcome, SessionSnapshot,
};

pub use crate::game::{Clock, ManualClock, MemoryGame, MismatchTimer, SystemClock};
