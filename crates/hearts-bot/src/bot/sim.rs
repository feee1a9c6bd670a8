//! Plays a fully determinized round to completion under the rollout policy.

use crate::policy::RolloutPolicy;
use mchearts_core::model::player::Seat;
use mchearts_core::model::round::{PlayError, RoundState};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("rollout play failed: {0}")]
    Play(#[from] PlayError),
    #[error("{seat} has no card to play but the round is not over")]
    Stalled { seat: Seat },
}

/// Runs `round` until every hand is empty and returns raw per-seat penalties
/// (no moon transform). Deterministic for a given starting state.
pub fn play_out(round: &mut RoundState) -> Result<[u8; 4], SimulationError> {
    while !round.hands_exhausted() {
        let seat = round.expected_to_play();
        let card =
            RolloutPolicy::choose(round, seat).ok_or(SimulationError::Stalled { seat })?;
        round.play_card(seat, card)?;
    }
    Ok(round.penalty_totals())
}

#[cfg(test)]
mod tests {
    use super::play_out;
    use mchearts_core::model::deck::Deck;
    use mchearts_core::model::round::RoundState;

    #[test]
    fn completed_round_distributes_all_26_points() {
        for seed in [1u64, 7, 42, 1234] {
            let mut round = RoundState::deal(&Deck::shuffled_with_seed(seed));
            let penalties = play_out(&mut round).expect("round plays out");
            let total: u16 = penalties.iter().map(|&p| u16::from(p)).sum();
            assert_eq!(total, 26, "seed {seed} leaked points");
            assert!(round.hands_exhausted());
            assert_eq!(round.tricks_completed(), 13);
        }
    }

    #[test]
    fn play_out_is_deterministic() {
        let mut a = RoundState::deal(&Deck::shuffled_with_seed(99));
        let mut b = RoundState::deal(&Deck::shuffled_with_seed(99));
        assert_eq!(play_out(&mut a).unwrap(), play_out(&mut b).unwrap());
    }
}
