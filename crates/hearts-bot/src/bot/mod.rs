//! The driver-facing bot: observation bookkeeping plus the decision entry
//! point.

mod config;
pub mod decision;
mod error;
pub mod sim;

pub use config::{BotConfig, DEFAULT_N_SAMPLES};
pub use error::BotError;

use crate::bot::decision::DecisionParams;
use mchearts_core::belief::{Belief, WorldSampler};
use mchearts_core::model::card::Card;
use mchearts_core::model::hand::Hand;
use mchearts_core::model::player::Seat;
use mchearts_core::model::round::RoundState;
use mchearts_core::model::trick::Trick;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::warn;

/// The observable slice of the round handed to [`MonteCarloBot::play_card`].
/// Wire encoding per crate::wire: cards as `(rank, suit)` pairs, seats 0..=3.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableState {
    pub own_hand: Hand,
    pub trick: Vec<(Seat, Card)>,
    pub hearts_broken: bool,
    pub is_first_trick: bool,
}

impl TableState {
    pub fn new(
        own_hand: Hand,
        trick: Vec<(Seat, Card)>,
        hearts_broken: bool,
        is_first_trick: bool,
    ) -> Self {
        Self {
            own_hand,
            trick,
            hearts_broken,
            is_first_trick,
        }
    }
}

/// Determinized Monte Carlo Hearts player. Owns its RNG, belief tracker and a
/// scratch round used by the simulator; not meant to be shared across rounds
/// of different games at once.
pub struct MonteCarloBot {
    seat: Seat,
    config: BotConfig,
    rng: StdRng,
    sampler: WorldSampler,
    belief: Option<Belief>,
    current_trick: Trick,
    completed: Vec<Trick>,
    scratch: RoundState,
}

impl MonteCarloBot {
    pub fn new(config: BotConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let sampler = WorldSampler::with_max_retries(config.max_retries);
        Self {
            seat: Seat::North,
            config,
            rng,
            sampler,
            belief: None,
            current_trick: Trick::new(Seat::North),
            completed: Vec::new(),
            scratch: RoundState::from_hands([Hand::EMPTY; 4], Seat::North),
        }
    }

    pub fn create(seed: Option<u64>, n_samples: usize) -> Self {
        let mut config = BotConfig::default().with_n_samples(n_samples);
        config.seed = seed;
        Self::new(config)
    }

    pub fn with_seat(mut self, seat: Seat) -> Self {
        self.seat = seat;
        self
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    pub fn belief(&self) -> Option<&Belief> {
        self.belief.as_ref()
    }

    /// Starts a round: seeds the belief from the bot's dealt hand and any
    /// cards it knows it passed to specific seats.
    pub fn init_beliefs(&mut self, own_hand: Hand, passed_to: &[(Seat, Hand)]) {
        self.belief = Some(Belief::new(self.seat, own_hand, passed_to));
        self.current_trick = Trick::new(self.seat);
        self.completed.clear();
    }

    /// Rehydrates the belief mid-round from explicit counts. Completed-trick
    /// history is unknown in this mode, so earlier penalties are not part of
    /// simulated totals.
    pub fn resume_beliefs(&mut self, own_hand: Hand, seen: Hand, remaining: [u8; 4]) {
        self.belief = Some(Belief::from_partial(self.seat, own_hand, seen, remaining));
        self.current_trick = Trick::new(self.seat);
        self.completed.clear();
    }

    /// Feeds one observed play into the belief tracker and the trick mirror.
    pub fn observe_play(&mut self, seat: Seat, card: Card) {
        if self.current_trick.is_complete() {
            self.roll_trick();
        }
        if self.current_trick.is_empty() {
            self.current_trick = Trick::new(seat);
        }

        let lead = self.current_trick.lead_suit();
        if let Some(belief) = self.belief.as_mut() {
            belief.on_play(seat, card, lead);
        }
        if let Err(err) = self.current_trick.play(seat, card) {
            warn!(%seat, %card, %err, "observed play does not fit the trick in progress");
        }
    }

    /// Hook for trick boundaries. Per-play updates carry all the inference;
    /// this keeps the completed-trick mirror in sync.
    pub fn observe_trick_complete(&mut self, trick: &Trick) {
        if let Some(belief) = self.belief.as_mut() {
            belief.on_trick_complete(trick);
        }
        if self.current_trick.is_complete() {
            self.roll_trick();
        } else if trick.is_complete() {
            warn!("trick mirror out of sync; resyncing from the observed trick");
            self.completed.push(trick.clone());
            let leader = trick.winner().unwrap_or_else(|| trick.leader());
            self.current_trick = Trick::new(leader);
        }
    }

    /// Chooses a card for the state in `table`. Fatal errors abort without
    /// committing any belief mutation beyond sampling recovery.
    pub fn play_card(&mut self, table: &TableState) -> Result<Card, BotError> {
        let belief = self.belief.as_mut().ok_or(BotError::NotInitialized)?;

        let own = belief.own();
        if table.own_hand != own {
            let diff = table
                .own_hand
                .minus(own)
                .union(own.minus(table.own_hand));
            return Err(BotError::HandMismatch(
                diff.lowest().expect("differing hands have a differing card"),
            ));
        }

        if table.is_first_trick != self.completed.is_empty() {
            warn!(
                table_first = table.is_first_trick,
                mirrored = self.completed.len(),
                "first-trick flag disagrees with observed history"
            );
        }

        let leader = table
            .trick
            .first()
            .map(|&(seat, _)| seat)
            .unwrap_or(self.seat);
        let mut trick = Trick::new(leader);
        for &(seat, card) in &table.trick {
            trick.play(seat, card)?;
        }

        let mut hands = [Hand::EMPTY; 4];
        hands[self.seat.index()] = own;
        let base = RoundState::from_partial(
            hands,
            trick,
            self.completed.clone(),
            table.hearts_broken,
        )
        .with_queen_breaks_hearts(self.config.queen_breaks_hearts);

        let params = DecisionParams {
            n_samples: self.config.n_samples,
            deadline: self.config.deadline.map(|budget| Instant::now() + budget),
        };
        decision::decide(
            &base,
            self.seat,
            belief,
            &self.sampler,
            &mut self.rng,
            &mut self.scratch,
            &params,
        )
    }

    fn roll_trick(&mut self) {
        if let Some(winner) = self.current_trick.winner() {
            let finished = std::mem::replace(&mut self.current_trick, Trick::new(winner));
            self.completed.push(finished);
        }
    }
}
