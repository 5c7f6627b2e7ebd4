//! End-to-end scenarios through the `MemoryGame` controller.
//!
//! Time is driven by a `ManualClock`, so mismatch recovery is exercised
//! without sleeping.

use std::time::Duration;

use memory_match::{
    CardId, ConfigError, GameRng, GameSession, GameSettings, Level, ManualClock, MemoryGame, Phase,
    SelectOutcome, SessionSnapshot, Theme, ThemeCatalog, MISMATCH_DELAY,
};
use rustc_hash::FxHashMap;

fn new_game(seed: u64) -> (MemoryGame<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let game = MemoryGame::with_parts(ThemeCatalog::builtin(), GameRng::new(seed), clock.clone());
    (game, clock)
}

fn assert_invariants(snapshot: &SessionSnapshot) {
    let matched = snapshot.matched_card_count();
    assert_eq!(matched % 2, 0);
    assert_eq!(matched, 2 * snapshot.matched_pairs);
    assert!(snapshot.pending_cards().count() <= 2);
    if snapshot.won {
        assert_eq!(snapshot.matched_pairs, snapshot.pair_count);
        assert!(snapshot.cards.iter().all(|c| c.is_matched));
        assert!(!snapshot.can_flip);
    }
}

/// Scenario A: a fresh beginner session.
#[test]
fn test_beginner_session_setup() {
    let (mut game, _) = new_game(1);
    let snapshot = game.start_session(Level::Beginner, "animals").unwrap();

    assert_eq!(snapshot.cards.len(), 8);
    assert_eq!(snapshot.moves, 0);
    assert_eq!(snapshot.matched_pairs, 0);
    assert_eq!(snapshot.pair_count, 4);
    assert!(snapshot.can_flip);
    assert!(!snapshot.won);
    assert_eq!(snapshot.phase, Phase::Playing);

    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    for card in &snapshot.cards {
        *counts.entry(card.pair_key.as_str()).or_default() += 1;
        assert!(!card.is_flipped);
        assert!(!card.is_matched);
    }
    assert_eq!(counts.len(), 4);
    assert!(counts.values().all(|&n| n == 2));

    // First four assets of the theme
    assert!(counts.contains_key("./images/animals/elephant.png"));
    assert!(counts.contains_key("./images/animals/monkey.png"));
    assert!(!counts.contains_key("./images/animals/octopus.png"));
}

#[test]
fn test_advanced_session_setup() {
    let (mut game, _) = new_game(2);
    let snapshot = game.start_session(Level::Advanced, "space").unwrap();
    assert_eq!(snapshot.cards.len(), 16);
    assert_eq!(snapshot.pair_count, 8);
    assert_invariants(&snapshot);
}

#[test]
fn test_configuration_errors() {
    let (mut game, _) = new_game(3);

    assert!(matches!(
        "expert".parse::<Level>(),
        Err(ConfigError::UnknownLevel(_))
    ));
    assert!(matches!(
        game.start_session(Level::Beginner, "nature"),
        Err(ConfigError::UnknownTheme(_))
    ));

    // No partial session is created
    assert_eq!(game.snapshot().phase, Phase::NotStarted);
    assert!(game.session().is_none());
}

#[test]
fn test_duplicate_assets_rejected_at_start() {
    let catalog = ThemeCatalog::builtin().with_theme(Theme::new(
        "mirror",
        "Mirror",
        vec!["sun.png".into(), "moon.png".into(), "sun.png".into(), "star.png".into()],
    ));
    let mut game = MemoryGame::with_parts(catalog, GameRng::new(10), ManualClock::new());

    assert!(matches!(
        game.start_session(Level::Beginner, "mirror"),
        Err(ConfigError::DuplicateAsset { .. })
    ));
    assert_eq!(game.snapshot().phase, Phase::NotStarted);

    // The built-in themes still deal normally from the same catalog
    let snapshot = game.start_session(Level::Beginner, "space").unwrap();
    assert_eq!(snapshot.generation, 1);
}

/// Scenario B: a true pair resolves immediately.
#[test]
fn test_match_resolves_immediately() {
    let (mut game, _) = new_game(4);
    game.start_session(Level::Beginner, "space").unwrap();

    let x = CardId::new(2, 0);
    let y = x.sibling();

    let after_first = game.select_card(x);
    assert_eq!(after_first.moves, 0);
    assert!(after_first.card(x).unwrap().is_flipped);

    let snapshot = game.select_card(y);
    for id in [x, y] {
        let card = snapshot.card(id).unwrap();
        assert!(card.is_matched);
        assert!(card.is_flipped);
    }
    assert_eq!(snapshot.matched_pairs, 1);
    assert_eq!(snapshot.moves, 1);
    assert!(snapshot.can_flip);
    assert_eq!(game.time_until_flip_back(), None);
    assert_invariants(&snapshot);
}

/// Scenario C: a mismatch stays on display for the full delay.
#[test]
fn test_mismatch_recovery_timing() {
    let (mut game, clock) = new_game(5);
    game.start_session(Level::Beginner, "space").unwrap();

    let x = CardId::new(0, 0);
    let z = CardId::new(3, 1);
    game.select_card(x);
    let snapshot = game.select_card(z);

    assert_eq!(snapshot.moves, 1);
    assert!(snapshot.card(x).unwrap().is_flipped);
    assert!(snapshot.card(z).unwrap().is_flipped);
    assert!(!snapshot.can_flip);
    assert_eq!(snapshot.phase, Phase::Resolving);

    // Still locked just before the deadline
    clock.advance(MISMATCH_DELAY - Duration::from_millis(1));
    let locked = game.select_card(x.sibling());
    assert!(!locked.can_flip);
    assert!(!locked.card(x.sibling()).unwrap().is_flipped);
    assert_eq!(locked.moves, 1);

    // Observing the board at the deadline is enough to see the flip-back
    clock.advance(Duration::from_millis(1));
    let snapshot = game.snapshot();
    assert_eq!(snapshot.phase, Phase::Playing);
    assert!(!snapshot.card(x).unwrap().is_flipped);
    assert!(!snapshot.card(z).unwrap().is_flipped);
    assert!(snapshot.can_flip);
    assert_eq!(snapshot.matched_pairs, 0);
    assert_eq!(snapshot.moves, 1);
    assert_invariants(&snapshot);
}

/// Scenario D: after the last pair the board freezes.
#[test]
fn test_win_freezes_board() {
    let (mut game, clock) = new_game(6);
    game.start_session(Level::Advanced, "animals").unwrap();

    // One mismatch along the way
    game.select_card(CardId::new(0, 0));
    game.select_card(CardId::new(1, 0));
    clock.advance(MISMATCH_DELAY);

    let mut snapshot = game.snapshot();
    for pair in 0..8 {
        game.select_card(CardId::new(pair, 0));
        snapshot = game.select_card(CardId::new(pair, 1));
        assert_invariants(&snapshot);
    }

    assert!(snapshot.won);
    assert!(!snapshot.can_flip);
    assert_eq!(snapshot.phase, Phase::Won);
    assert_eq!(snapshot.moves, 9);
    assert_eq!(
        snapshot.win_message().as_deref(),
        Some("You completed the game in 9 moves.")
    );

    for card in snapshot.cards.iter() {
        let after = game.select_card(card.id);
        assert_eq!(after, snapshot);
    }
}

/// Scenario E: a pending flip-back never reaches a newer session.
#[test]
fn test_new_session_cancels_pending_flip_back() {
    let (mut game, clock) = new_game(7);
    game.start_session(Level::Beginner, "space").unwrap();

    let x = CardId::new(0, 0);
    let z = CardId::new(1, 0);
    game.select_card(x);
    game.select_card(z);
    assert!(game.time_until_flip_back().is_some());

    let fresh = game.start_session(Level::Beginner, "space").unwrap();
    assert_eq!(fresh.generation, 2);

    // Reveal the same two ids in the new session before the old deadline
    game.select_card(x);
    clock.advance(MISMATCH_DELAY);
    assert!(!game.poll());

    let snapshot = game.snapshot();
    assert!(snapshot.card(x).unwrap().is_flipped);
    assert!(!snapshot.card(z).unwrap().is_flipped);
    assert!(snapshot.can_flip);
    assert_eq!(snapshot.moves, 0);
}

#[test]
fn test_stale_ticket_rejected_by_session() {
    let catalog = ThemeCatalog::builtin();
    let settings = GameSettings::new(Level::Beginner, "animals");

    let mut old = GameSession::new(&settings, &catalog, &mut GameRng::new(9), 1).unwrap();
    let mut new = GameSession::new(&settings, &catalog, &mut GameRng::new(9), 2).unwrap();

    let x = CardId::new(0, 0);
    let z = CardId::new(1, 0);

    old.select(x);
    let stale = old.select(z).ticket().unwrap();

    new.select(x);
    let current = new.select(z).ticket().unwrap();

    assert!(!new.flip_back(&stale));
    assert!(!new.can_flip());
    assert!(new.flip_back(&current));
    assert!(new.can_flip());
}

#[test]
fn test_return_to_settings_discards_progress() {
    let (mut game, clock) = new_game(8);
    game.start_session(Level::Advanced, "space").unwrap();
    game.select_card(CardId::new(0, 0));
    game.select_card(CardId::new(0, 1));
    game.select_card(CardId::new(1, 0));
    game.select_card(CardId::new(2, 0));

    game.return_to_settings();
    clock.advance(MISMATCH_DELAY);
    assert!(!game.poll());

    let snapshot = game.snapshot();
    assert_eq!(snapshot.phase, Phase::NotStarted);
    assert_eq!(snapshot.level, Level::Advanced);

    let replay = game.restart().unwrap();
    assert_eq!(replay.moves, 0);
    assert_eq!(replay.matched_pairs, 0);
    assert!(replay.cards.iter().all(|c| !c.is_face_up()));
}

#[test]
fn test_same_seed_same_deal() {
    let (mut a, _) = new_game(1234);
    let (mut b, _) = new_game(1234);
    let deal_a = a.start_session(Level::Advanced, "animals").unwrap();
    let deal_b = b.start_session(Level::Advanced, "animals").unwrap();
    assert_eq!(deal_a.cards, deal_b.cards);
}

#[test]
fn test_memoryless_player_finishes() {
    // Always flip the first two legal cards; recovery via the clock
    let catalog = ThemeCatalog::builtin();
    let settings = GameSettings::new(Level::Advanced, "space");
    let mut session = GameSession::new(&settings, &catalog, &mut GameRng::new(77), 1).unwrap();

    let mut guard = 0;
    while !session.is_won() && guard < 10_000 {
        let legal = session.legal_selections();
        let first = legal[0];
        session.select(first);
        let second = session.legal_selections()[guard % (legal.len() - 1)];
        if let SelectOutcome::Mismatched(ticket) = session.select(second) {
            assert!(session.flip_back(&ticket));
        }
        assert_invariants(&session.snapshot());
        guard += 1;
    }

    assert!(session.is_won());
    assert_eq!(session.moves() as usize, guard);
}
