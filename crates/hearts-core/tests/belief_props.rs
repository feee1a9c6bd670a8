//! Property-based invariants for the belief tracker, driven by observation
//! sequences generated from a concrete hidden deal so every observation is one
//! a legal game could produce.

use mchearts_core::belief::Belief;
use mchearts_core::model::card::Card;
use mchearts_core::model::deck::Deck;
use mchearts_core::model::hand::Hand;
use mchearts_core::model::player::Seat;
use mchearts_core::model::suit::Suit;
use proptest::prelude::*;
use proptest::sample::Index;

const PERSPECTIVE: Seat = Seat::North;

fn deal_hands(seed: u64) -> [Hand; 4] {
    let deck = Deck::shuffled_with_seed(seed);
    let mut hands = [Hand::EMPTY; 4];
    for (index, card) in deck.cards().iter().enumerate() {
        hands[index % 4].add(*card);
    }
    hands
}

/// Replays generated observations against both the true deal and the belief,
/// returning the belief afterwards.
fn replay(seed: u64, plays: &[(Index, Index, bool)]) -> Belief {
    let mut hands = deal_hands(seed);
    let mut belief = Belief::new(PERSPECTIVE, hands[PERSPECTIVE.index()], &[]);

    for (seat_pick, card_pick, try_offsuit) in plays {
        let seat = belief.opponents()[seat_pick.index(3)];
        let hand = hands[seat.index()];
        if hand.is_empty() {
            continue;
        }
        let cards: Vec<Card> = hand.iter().collect();
        let card = cards[card_pick.index(cards.len())];

        // An off-suit lead is only observable for suits the seat truly lacks.
        let lead = if *try_offsuit {
            Suit::ALL
                .iter()
                .copied()
                .find(|&suit| !hand.has_suit(suit))
                .unwrap_or(card.suit)
        } else {
            card.suit
        };

        hands[seat.index()].remove(card);
        belief.on_play(seat, card, Some(lead));
    }
    belief
}

fn assert_invariants(belief: &Belief) {
    for card in belief.unseen().iter() {
        let row: f64 = belief
            .opponents()
            .iter()
            .map(|&seat| belief.prob(card, seat))
            .sum();
        assert!((row - 1.0).abs() < 1e-6, "mass for {card} sums to {row}");
    }
    for seat in belief.opponents() {
        let col: f64 = belief
            .unseen()
            .iter()
            .map(|card| belief.prob(card, seat))
            .sum();
        let expected = f64::from(belief.remaining(seat));
        assert!(
            (col - expected).abs() < 1e-6,
            "column for {seat} sums to {col}, expected {expected}"
        );
        for suit in Suit::ALL {
            if belief.is_void(seat, suit) {
                for card in belief.unseen().of_suit(suit).iter() {
                    assert_eq!(belief.prob(card, seat), 0.0, "{seat} is void in {suit}");
                }
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn invariants_hold_under_any_legal_observation_sequence(
        seed in any::<u64>(),
        plays in proptest::collection::vec((any::<Index>(), any::<Index>(), any::<bool>()), 0..16),
    ) {
        let belief = replay(seed, &plays);
        assert_invariants(&belief);
    }

    #[test]
    fn counts_track_observed_plays(
        seed in any::<u64>(),
        plays in proptest::collection::vec((any::<Index>(), any::<Index>(), any::<bool>()), 1..12),
    ) {
        let belief = replay(seed, &plays);
        let opponent_cards: usize = belief
            .opponents()
            .iter()
            .map(|&seat| belief.remaining(seat) as usize)
            .sum();
        prop_assert_eq!(opponent_cards, belief.unseen().len());
    }

    #[test]
    fn voids_are_monotone_without_contradicting_observations(
        seed in any::<u64>(),
        plays in proptest::collection::vec((any::<Index>(), any::<Index>(), any::<bool>()), 1..12),
    ) {
        let mut hands = deal_hands(seed);
        let mut belief = Belief::new(PERSPECTIVE, hands[PERSPECTIVE.index()], &[]);
        let mut proven: Vec<(Seat, Suit)> = Vec::new();

        for (seat_pick, card_pick, try_offsuit) in &plays {
            let seat = belief.opponents()[seat_pick.index(3)];
            let hand = hands[seat.index()];
            if hand.is_empty() {
                continue;
            }
            let cards: Vec<Card> = hand.iter().collect();
            let card = cards[card_pick.index(cards.len())];
            let lead = if *try_offsuit {
                Suit::ALL
                    .iter()
                    .copied()
                    .find(|&suit| !hand.has_suit(suit))
                    .unwrap_or(card.suit)
            } else {
                card.suit
            };
            hands[seat.index()].remove(card);
            belief.on_play(seat, card, Some(lead));
            if lead != card.suit {
                proven.push((seat, lead));
            }
            for &(void_seat, void_suit) in &proven {
                prop_assert!(belief.is_void(void_seat, void_suit));
            }
        }
    }
}
