//! Dealing a shuffled deck.

use im::Vector;

use super::card::Card;
use crate::core::{CardId, GameRng};

/// Build two face-down cards per asset and shuffle them.
///
/// Pair `i` is dealt as `card-i-a` / `card-i-b`. Shuffling only affects
/// display order; ids and pairing keys are fixed before the shuffle.
pub fn deal(assets: &[String], rng: &mut GameRng) -> Vector<Card> {
    let mut cards: Vec<Card> = assets
        .iter()
        .enumerate()
        .flat_map(|(pair, asset)| {
            let pair = pair as u32;
            [
                Card::new(CardId::new(pair, 0), asset),
                Card::new(CardId::new(pair, 1), asset),
            ]
        })
        .collect();

    rng.shuffle(&mut cards);
    cards.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    fn assets(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("asset-{}", i)).collect()
    }

    #[test]
    fn test_deal_two_per_asset() {
        let mut rng = GameRng::new(42);
        let deck = deal(&assets(4), &mut rng);
        assert_eq!(deck.len(), 8);

        let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
        for card in &deck {
            *counts.entry(card.pair_key.as_str()).or_default() += 1;
            assert!(card.is_selectable());
        }
        assert_eq!(counts.len(), 4);
        assert!(counts.values().all(|&c| c == 2));
    }

    #[test]
    fn test_partners_share_key() {
        let mut rng = GameRng::new(3);
        let deck = deal(&assets(8), &mut rng);
        for card in &deck {
            let partner = deck.iter().find(|c| c.id == card.id.sibling()).unwrap();
            assert!(card.pairs_with(partner));
        }
    }

    #[test]
    fn test_ids_unique() {
        let mut rng = GameRng::new(1);
        let deck = deal(&assets(8), &mut rng);
        let mut ids: Vec<_> = deck.iter().map(|c| c.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 16);
    }

    #[test]
    fn test_deal_is_deterministic() {
        let a = deal(&assets(8), &mut GameRng::new(99));
        let b = deal(&assets(8), &mut GameRng::new(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_deal_is_shuffled() {
        let deck = deal(&assets(8), &mut GameRng::new(42));
        let order: Vec<u32> = deck.iter().map(|c| c.id.raw()).collect();
        let sorted: Vec<u32> = (0..16).collect();
        assert_ne!(order, sorted);
    }

    #[test]
    fn test_deal_empty() {
        let deck = deal(&[], &mut GameRng::new(0));
        assert!(deck.is_empty());
    }
}
