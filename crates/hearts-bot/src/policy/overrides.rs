//! Zero-sample fast paths consulted before Monte Carlo evaluation.

use mchearts_core::model::card::Card;
use mchearts_core::model::hand::Hand;
use mchearts_core::model::player::Seat;
use mchearts_core::model::round::RoundState;

/// Returns a move that makes sampling pointless, or None to defer to
/// evaluation. The sole entry point for fast paths: a single legal card (the
/// forced Two of Clubs opening arrives here as one, since the legality rules
/// restrict the first lead to it) or a guaranteed-safe dump as the last
/// player on a pointless trick we cannot win.
pub fn forced_play(round: &RoundState, _seat: Seat, legal: Hand) -> Option<Card> {
    if legal.len() == 1 {
        return legal.lowest();
    }

    let trick = round.current_trick();
    if trick.plays().len() == 3
        && let Some(lead) = trick.lead_suit()
    {
        let winning_rank = trick.winning_play().map(|play| play.card.rank)?;
        let can_win = legal
            .of_suit(lead)
            .iter()
            .any(|card| card.rank > winning_rank);
        if !can_win && trick.penalty_total() == 0 {
            return legal
                .iter()
                .max_by_key(|card| (card.rank.value(), card.suit as u8));
        }
    }

    None
}
