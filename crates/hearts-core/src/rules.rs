//! Pure rule functions shared by the round state, the simulator and the bot.

use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::player::Seat;
use crate::model::suit::Suit;
use crate::model::trick::Trick;

/// Legal cards from `hand` given the trick in progress.
///
/// Leading: the first trick must open with the Two of Clubs; before hearts are
/// broken a heart may only be led from an all-hearts hand. Following: lead suit
/// must be followed when possible; on the first trick penalty cards stay in
/// hand unless the hand holds nothing else.
pub fn legal_plays(hand: Hand, trick: &Trick, hearts_broken: bool, is_first_trick: bool) -> Hand {
    let base = match trick.lead_suit() {
        None => lead_plays(hand, hearts_broken, is_first_trick),
        Some(lead) => follow_plays(hand, lead),
    };

    if is_first_trick {
        let clean = base.without_penalties();
        if clean.is_empty() { base } else { clean }
    } else {
        base
    }
}

fn lead_plays(hand: Hand, hearts_broken: bool, is_first_trick: bool) -> Hand {
    if is_first_trick {
        let two = Card::two_of_clubs();
        return if hand.contains(two) {
            Hand::from_cards(&[two])
        } else {
            Hand::EMPTY
        };
    }

    if hearts_broken {
        return hand;
    }

    let non_hearts = hand.minus(hand.of_suit(Suit::Hearts));
    if non_hearts.is_empty() { hand } else { non_hearts }
}

fn follow_plays(hand: Hand, lead: Suit) -> Hand {
    let in_suit = hand.of_suit(lead);
    if in_suit.is_empty() { hand } else { in_suit }
}

/// Seat currently holding the trick: highest card of the lead suit.
/// Provisional while the trick is incomplete; None for an empty trick.
pub fn trick_winner(trick: &Trick) -> Option<Seat> {
    trick.winning_play().map(|play| play.seat)
}

pub const fn points(card: Card) -> u8 {
    card.penalty_value()
}

/// Hearts-broken transition. The Queen of Spades breaking hearts is a house
/// rule; `queen_breaks` selects the variant.
pub const fn hearts_broken_after(prev: bool, card: Card, queen_breaks: bool) -> bool {
    prev || card.suit.is_heart() || (queen_breaks && card.is_queen_of_spades())
}
