use crate::model::card::Card;
use crate::model::player::Seat;
use crate::model::suit::Suit;
use std::fmt;

#[derive(Debug)]
pub struct Trick {
    leader: Seat,
    plays: Vec<Play>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Play {
    pub seat: Seat,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrickError {
    TrickComplete,
    OutOfTurn { expected: Seat, actual: Seat },
}

impl fmt::Display for TrickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrickError::TrickComplete => write!(f, "trick already complete"),
            TrickError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to play next but got {actual}")
            }
        }
    }
}

impl std::error::Error for TrickError {}

impl Trick {
    pub fn new(leader: Seat) -> Self {
        Self {
            leader,
            plays: Vec::with_capacity(4),
        }
    }

    pub fn leader(&self) -> Seat {
        self.leader
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == 4
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(|play| play.card.suit)
    }

    pub fn expected_seat(&self) -> Seat {
        self.plays
            .last()
            .map(|play| play.seat.next())
            .unwrap_or(self.leader)
    }

    /// Turn validation. Plays rotate clockwise from the leader, one per seat,
    /// so the expected seat fully determines whether `seat` may play now.
    pub fn check_turn(&self, seat: Seat) -> Result<(), TrickError> {
        if self.is_complete() {
            return Err(TrickError::TrickComplete);
        }
        let expected = self.expected_seat();
        if expected != seat {
            return Err(TrickError::OutOfTurn {
                expected,
                actual: seat,
            });
        }
        Ok(())
    }

    pub fn play(&mut self, seat: Seat, card: Card) -> Result<(), TrickError> {
        self.check_turn(seat)?;
        self.plays.push(Play { seat, card });
        Ok(())
    }

    /// Highest play of the lead suit so far; the provisional trick winner.
    pub fn winning_play(&self) -> Option<Play> {
        let lead = self.lead_suit()?;
        self.plays
            .iter()
            .filter(|play| play.card.suit == lead)
            .max_by(|a, b| a.card.rank.cmp(&b.card.rank))
            .copied()
    }

    pub fn winner(&self) -> Option<Seat> {
        if !self.is_complete() {
            return None;
        }
        self.winning_play().map(|play| play.seat)
    }

    pub fn penalty_total(&self) -> u8 {
        self.plays
            .iter()
            .map(|play| play.card.penalty_value())
            .sum()
    }
}

impl Clone for Trick {
    fn clone(&self) -> Self {
        Self {
            leader: self.leader,
            plays: self.plays.clone(),
        }
    }

    // clone_from reuses the existing plays buffer.
    fn clone_from(&mut self, source: &Self) {
        self.leader = source.leader;
        self.plays.clone_from(&source.plays);
    }
}
