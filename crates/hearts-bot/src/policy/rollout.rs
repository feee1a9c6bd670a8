//! Fixed opponent policy used inside rollouts.
//!
//! Deterministic by construction: rollout results must be reproducible for a
//! given sampled world, so every choice here is a pure function of the state.

use mchearts_core::model::card::Card;
use mchearts_core::model::hand::Hand;
use mchearts_core::model::player::Seat;
use mchearts_core::model::round::RoundState;
use mchearts_core::model::suit::Suit;
use mchearts_core::model::trick::Trick;

pub struct RolloutPolicy;

impl RolloutPolicy {
    /// Card the rollout policy plays for `seat`, or None on an empty hand.
    pub fn choose(round: &RoundState, seat: Seat) -> Option<Card> {
        let legal = {
            let legal = round.legal_plays(seat);
            if legal.is_empty() {
                round.hand(seat)
            } else {
                legal
            }
        };
        if legal.is_empty() {
            return None;
        }

        let trick = round.current_trick();
        let card = match trick.lead_suit() {
            None => Self::lead(legal),
            Some(lead) if legal.has_suit(lead) => Self::follow(legal, trick, lead),
            Some(_) => Self::discard(legal),
        };
        Some(card)
    }

    /// Lead the lowest non-point card of the longest suit, else the lowest
    /// card overall.
    fn lead(legal: Hand) -> Card {
        let mut longest: Option<(usize, Suit)> = None;
        for suit in Suit::ALL {
            let count = legal.suit_len(suit);
            if count > longest.map_or(0, |(best, _)| best) {
                longest = Some((count, suit));
            }
        }
        if let Some((_, suit)) = longest
            && let Some(card) = legal.of_suit(suit).without_penalties().lowest()
        {
            return card;
        }
        lowest_by_rank(legal).expect("legal plays are non-empty")
    }

    /// Follow suit: duck under the winner when the trick carries points, win
    /// cheaply as the last player, otherwise play low.
    fn follow(legal: Hand, trick: &Trick, lead: Suit) -> Card {
        let in_suit = legal.of_suit(lead);
        let winning_rank = trick
            .winning_play()
            .map(|play| play.card.rank)
            .expect("led trick has a winning play");

        if trick.penalty_total() > 0 {
            let under: Hand = in_suit
                .iter()
                .filter(|card| card.rank < winning_rank)
                .collect();
            if let Some(card) = under.highest() {
                return card;
            }
        } else if trick.plays().len() == 3 {
            let winners: Hand = in_suit
                .iter()
                .filter(|card| card.rank > winning_rank)
                .collect();
            if let Some(card) = winners.lowest() {
                return card;
            }
        }

        in_suit.lowest().expect("follower holds the lead suit")
    }

    /// Off-suit discard: highest Heart, else the Queen of Spades, else the
    /// highest card of any suit.
    fn discard(legal: Hand) -> Card {
        if let Some(heart) = legal.of_suit(Suit::Hearts).highest() {
            return heart;
        }
        if legal.contains(Card::queen_of_spades()) {
            return Card::queen_of_spades();
        }
        highest_by_rank(legal).expect("legal plays are non-empty")
    }
}

fn lowest_by_rank(cards: Hand) -> Option<Card> {
    cards.iter().min_by_key(|card| (card.rank.value(), card.suit as u8))
}

fn highest_by_rank(cards: Hand) -> Option<Card> {
    cards.iter().max_by_key(|card| (card.rank.value(), card.suit as u8))
}
