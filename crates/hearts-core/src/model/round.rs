use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::hand::Hand;
use crate::model::player::Seat;
use crate::model::suit::Suit;
use crate::model::trick::{Trick, TrickError};
use crate::rules;
use std::fmt;

/// A round of Hearts in progress: four hands, the trick being played, what has
/// already been captured. The only mutable object during a decision.
#[derive(Debug)]
pub struct RoundState {
    hands: [Hand; 4],
    current_trick: Trick,
    trick_history: Vec<Trick>,
    captured: [u8; 4],
    hearts_broken: bool,
    queen_breaks_hearts: bool,
}

impl RoundState {
    /// Deals a full deck round-robin; the holder of the Two of Clubs leads.
    pub fn deal(deck: &Deck) -> Self {
        let mut hands = [Hand::EMPTY; 4];
        for (index, card) in deck.cards().iter().enumerate() {
            hands[index % 4].add(*card);
        }
        let leader = Seat::LOOP
            .iter()
            .copied()
            .find(|seat| hands[seat.index()].contains(Card::two_of_clubs()))
            .unwrap_or(Seat::North);
        Self::from_hands(hands, leader)
    }

    pub fn from_hands(hands: [Hand; 4], leader: Seat) -> Self {
        Self {
            hands,
            current_trick: Trick::new(leader),
            trick_history: Vec::new(),
            captured: [0; 4],
            hearts_broken: false,
            queen_breaks_hearts: true,
        }
    }

    /// Rebuilds a round already underway from observed components.
    pub fn from_partial(
        hands: [Hand; 4],
        current_trick: Trick,
        trick_history: Vec<Trick>,
        hearts_broken: bool,
    ) -> Self {
        let mut captured = [0u8; 4];
        for trick in &trick_history {
            if let Some(winner) = trick.winner() {
                captured[winner.index()] =
                    captured[winner.index()].saturating_add(trick.penalty_total());
            }
        }
        Self {
            hands,
            current_trick,
            trick_history,
            captured,
            hearts_broken,
            queen_breaks_hearts: true,
        }
    }

    pub fn with_queen_breaks_hearts(mut self, enabled: bool) -> Self {
        self.queen_breaks_hearts = enabled;
        self
    }

    pub fn hand(&self, seat: Seat) -> Hand {
        self.hands[seat.index()]
    }

    pub fn set_hand(&mut self, seat: Seat, hand: Hand) {
        self.hands[seat.index()] = hand;
    }

    pub fn current_trick(&self) -> &Trick {
        &self.current_trick
    }

    pub fn trick_history(&self) -> &[Trick] {
        &self.trick_history
    }

    pub fn tricks_completed(&self) -> usize {
        self.trick_history.len()
    }

    pub fn is_first_trick(&self) -> bool {
        self.trick_history.is_empty()
    }

    pub fn hearts_broken(&self) -> bool {
        self.hearts_broken
    }

    pub fn queen_breaks_hearts(&self) -> bool {
        self.queen_breaks_hearts
    }

    pub fn expected_to_play(&self) -> Seat {
        self.current_trick.expected_seat()
    }

    pub fn hands_exhausted(&self) -> bool {
        self.hands.iter().all(|hand| hand.is_empty())
    }

    /// Penalty points captured per seat from completed tricks.
    pub fn penalty_totals(&self) -> [u8; 4] {
        self.captured
    }

    pub fn legal_plays(&self, seat: Seat) -> Hand {
        rules::legal_plays(
            self.hands[seat.index()],
            &self.current_trick,
            self.hearts_broken,
            self.is_first_trick(),
        )
    }

    pub fn play_card(&mut self, seat: Seat, card: Card) -> Result<PlayOutcome, PlayError> {
        if !self.hands[seat.index()].contains(card) {
            return Err(PlayError::CardNotInHand(card));
        }

        self.current_trick
            .check_turn(seat)
            .map_err(|err| match err {
                TrickError::OutOfTurn { expected, actual } => {
                    PlayError::OutOfTurn { expected, actual }
                }
                other => PlayError::Trick(other),
            })?;

        let legal = self.legal_plays(seat);
        if !legal.contains(card) {
            return Err(self.classify_illegal(seat, card));
        }

        self.hands[seat.index()].remove(card);
        self.hearts_broken =
            rules::hearts_broken_after(self.hearts_broken, card, self.queen_breaks_hearts);
        self.current_trick.play(seat, card).map_err(PlayError::Trick)?;

        if self.current_trick.is_complete() {
            let winner = self
                .current_trick
                .winner()
                .expect("complete trick has a winner");
            let penalties = self.current_trick.penalty_total();
            self.captured[winner.index()] = self.captured[winner.index()].saturating_add(penalties);
            let finished = std::mem::replace(&mut self.current_trick, Trick::new(winner));
            self.trick_history.push(finished);
            Ok(PlayOutcome::TrickCompleted { winner, penalties })
        } else {
            Ok(PlayOutcome::Played)
        }
    }

    fn classify_illegal(&self, seat: Seat, card: Card) -> PlayError {
        let lead = self.current_trick.lead_suit();
        if self.is_first_trick() && lead.is_none() && card != Card::two_of_clubs() {
            return PlayError::MustLeadTwoOfClubs;
        }
        if let Some(suit) = lead
            && card.suit != suit
            && self.hands[seat.index()].has_suit(suit)
        {
            return PlayError::MustFollowSuit(suit);
        }
        if lead.is_none() && card.suit == Suit::Hearts && !self.hearts_broken {
            return PlayError::HeartsNotBroken;
        }
        PlayError::NoPointsOnFirstTrick
    }
}

impl Clone for RoundState {
    fn clone(&self) -> Self {
        Self {
            hands: self.hands,
            current_trick: self.current_trick.clone(),
            trick_history: self.trick_history.clone(),
            captured: self.captured,
            hearts_broken: self.hearts_broken,
            queen_breaks_hearts: self.queen_breaks_hearts,
        }
    }

    // Reuses the trick buffers of an existing scratch state.
    fn clone_from(&mut self, source: &Self) {
        self.hands = source.hands;
        self.current_trick.clone_from(&source.current_trick);
        self.trick_history.clone_from(&source.trick_history);
        self.captured = source.captured;
        self.hearts_broken = source.hearts_broken;
        self.queen_breaks_hearts = source.queen_breaks_hearts;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Played,
    TrickCompleted { winner: Seat, penalties: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayError {
    CardNotInHand(Card),
    OutOfTurn { expected: Seat, actual: Seat },
    MustLeadTwoOfClubs,
    MustFollowSuit(Suit),
    HeartsNotBroken,
    NoPointsOnFirstTrick,
    Trick(TrickError),
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::CardNotInHand(card) => write!(f, "{card} is not in hand"),
            PlayError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to play but got {actual}")
            }
            PlayError::MustLeadTwoOfClubs => write!(f, "first trick must open with 2C"),
            PlayError::MustFollowSuit(suit) => write!(f, "must follow {suit}"),
            PlayError::HeartsNotBroken => write!(f, "hearts have not been broken"),
            PlayError::NoPointsOnFirstTrick => {
                write!(f, "penalty cards may not be played on the first trick")
            }
            PlayError::Trick(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for PlayError {}
