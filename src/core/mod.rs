//! Core engine types: card ids, RNG, configuration, errors.
//!
//! These are the building blocks shared by the deck, the session state
//! machine and the controller.

pub mod entity;
pub mod rng;
pub mod config;
pub mod error;

pub use entity::CardId;
pub use rng::GameRng;
pub use config::{GameSettings, Level, Theme, ThemeCatalog, ThemeId, CARD_BACK_IMAGE, MISMATCH_DELAY};
pub use error::{ConfigError, Result};
