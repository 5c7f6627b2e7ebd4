//! Game controller: the interface the presentation layer talks to.
//!
//! `MemoryGame` owns the settings, the current session and the mismatch
//! timer. All mutation goes through three events, processed one at a time:
//!
//! - start-session (`start_session`, `restart`)
//! - select-card (`select_card`)
//! - mismatch-timer-fire (`poll`, also run by `select_card` and `snapshot`)
//!
//! Starting a new session or returning to settings cancels the timer, and
//! every session gets a fresh generation, so a flip-back can never reach a
//! session other than the one that scheduled it.

use std::time::Duration;

use tracing::info;

use super::clock::{Clock, SystemClock};
use super::timer::MismatchTimer;
use crate::core::{CardId, GameRng, GameSettings, Level, Result, ThemeCatalog, ThemeId};
use crate::session::{GameSession, SessionSnapshot};

/// The memory game, from settings screen through any number of sessions.
#[derive(Debug)]
pub struct MemoryGame<C: Clock = SystemClock> {
    settings: GameSettings,
    catalog: ThemeCatalog,
    rng: GameRng,
    clock: C,
    session: Option<GameSession>,
    timer: MismatchTimer,
    /// Generation of the most recently started session.
    generation: u64,
}

impl MemoryGame<SystemClock> {
    /// Create a game on the wall clock with an entropy-seeded deck shuffle.
    #[must_use]
    pub fn new(catalog: ThemeCatalog) -> Self {
        Self::with_parts(catalog, GameRng::from_entropy(), SystemClock)
    }
}

impl<C: Clock> MemoryGame<C> {
    /// Create a game from explicit collaborators.
    #[must_use]
    pub fn with_parts(catalog: ThemeCatalog, rng: GameRng, clock: C) -> Self {
        Self {
            settings: GameSettings::default(),
            catalog,
            rng,
            clock,
            session: None,
            timer: MismatchTimer::default(),
            generation: 0,
        }
    }

    /// Set the initial settings.
    #[must_use]
    pub fn with_settings(mut self, settings: GameSettings) -> Self {
        self.settings = settings;
        self
    }

    // === Settings ===

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Change the level for the next session. The current one is unaffected.
    pub fn set_level(&mut self, level: Level) {
        self.settings.level = level;
    }

    /// Change the theme for the next session. The current one is unaffected.
    pub fn set_theme(&mut self, theme: impl Into<ThemeId>) {
        self.settings.theme = theme.into();
    }

    #[must_use]
    pub fn catalog(&self) -> &ThemeCatalog {
        &self.catalog
    }

    // === Session lifecycle ===

    /// The live session, if one has been started.
    #[must_use]
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Generation of the most recently started session (0 before the first).
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Discard any current session and deal a new one.
    ///
    /// On a configuration error nothing changes: the previous session, its
    /// timer and the stored settings are all kept.
    pub fn start_session(
        &mut self,
        level: Level,
        theme: impl Into<ThemeId>,
    ) -> Result<SessionSnapshot> {
        let settings = GameSettings::new(level, theme);
        let generation = self.generation + 1;
        let session = GameSession::new(&settings, &self.catalog, &mut self.rng, generation)?;

        if let Some(cancelled) = self.timer.cancel() {
            info!(
                generation = cancelled.ticket.generation,
                "pending flip-back cancelled by new session"
            );
        }

        self.generation = generation;
        self.settings = settings;
        let snapshot = session.snapshot();
        self.session = Some(session);
        Ok(snapshot)
    }

    /// Start a new session with the stored settings ("play again").
    pub fn restart(&mut self) -> Result<SessionSnapshot> {
        let GameSettings { level, theme } = self.settings.clone();
        self.start_session(level, theme)
    }

    /// Discard the session and go back to the settings screen.
    ///
    /// Settings are kept; only game progress is lost.
    pub fn return_to_settings(&mut self) {
        self.timer.cancel();
        if let Some(session) = self.session.take() {
            info!(generation = session.generation(), "returned to settings");
        }
    }

    // === Gameplay ===

    /// Select a card and return the resulting state.
    ///
    /// Any overdue flip-back is applied first. Illegal selections are
    /// silently ignored.
    pub fn select_card(&mut self, id: CardId) -> SessionSnapshot {
        self.poll();

        if let Some(session) = self.session.as_mut() {
            let outcome = session.select(id);
            if let Some(ticket) = outcome.ticket() {
                self.timer.schedule(ticket, self.clock.now());
            }
        }

        self.snapshot()
    }

    /// Fire the mismatch timer if its deadline has passed.
    ///
    /// Returns true if cards were flipped back.
    pub fn poll(&mut self) -> bool {
        let Some(ticket) = self.timer.take_due(self.clock.now()) else {
            return false;
        };
        self.session
            .as_mut()
            .is_some_and(|session| session.flip_back(&ticket))
    }

    /// How long until a pending mismatch flips back.
    #[must_use]
    pub fn time_until_flip_back(&self) -> Option<Duration> {
        self.timer.remaining(self.clock.now())
    }

    /// View of the current state.
    ///
    /// Any overdue flip-back is applied first, so the view never shows a
    /// mismatch past its deadline.
    pub fn snapshot(&mut self) -> SessionSnapshot {
        self.poll();
        match &self.session {
            Some(session) => session.snapshot(),
            None => SessionSnapshot::not_started(&self.settings),
        }
    }
}
