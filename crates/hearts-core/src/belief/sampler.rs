//! Draws fully determinized opponent hands from a belief distribution.

use crate::belief::Belief;
use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::player::Seat;
use rand::Rng;
use std::fmt;

pub const DEFAULT_MAX_RETRIES: usize = 32;

/// Weighted sampling without replacement over the belief matrix, restarting on
/// dead ends and falling back to a constructive assignment when the retry
/// budget is exhausted.
#[derive(Debug, Clone)]
pub struct WorldSampler {
    max_retries: usize,
}

impl Default for WorldSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldSampler {
    pub fn new() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    pub fn with_max_retries(max_retries: usize) -> Self {
        Self {
            max_retries: max_retries.max(1),
        }
    }

    pub fn max_retries(&self) -> usize {
        self.max_retries
    }

    /// Draws one world: every unseen card assigned to an opponent seat,
    /// hand sizes matching the belief's remaining counts, voids respected.
    pub fn draw<R: Rng + ?Sized>(
        &self,
        belief: &Belief,
        rng: &mut R,
    ) -> Result<SampledWorld, SamplingError> {
        let expected: usize = belief
            .opponents()
            .iter()
            .map(|&seat| belief.remaining(seat) as usize)
            .sum();
        if expected != belief.unseen().len() {
            return Err(SamplingError::CountMismatch {
                unseen: belief.unseen().len(),
                expected,
            });
        }

        for _ in 0..self.max_retries {
            if let Some(hands) = draw_once(belief, rng) {
                return Ok(SampledWorld { hands });
            }
        }

        constructive_draw(belief, rng)
            .map(|hands| SampledWorld { hands })
            .ok_or(SamplingError::Infeasible {
                attempts: self.max_retries,
            })
    }
}

/// A concrete assignment of every unseen card, forming a full deal together
/// with the bot's own hand. Short-lived: consumed by one simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampledWorld {
    hands: [Hand; 4],
}

impl SampledWorld {
    pub fn hand(&self, seat: Seat) -> Hand {
        self.hands[seat.index()]
    }

    pub fn hands(&self) -> &[Hand; 4] {
        &self.hands
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SamplingError {
    CountMismatch { unseen: usize, expected: usize },
    Infeasible { attempts: usize },
}

impl fmt::Display for SamplingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplingError::CountMismatch { unseen, expected } => write!(
                f,
                "{unseen} unseen cards cannot fill {expected} opponent slots"
            ),
            SamplingError::Infeasible { attempts } => {
                write!(f, "no consistent world found after {attempts} attempts")
            }
        }
    }
}

impl std::error::Error for SamplingError {}

fn seed_hands(belief: &Belief) -> [Hand; 4] {
    let mut hands = [Hand::EMPTY; 4];
    hands[belief.perspective().index()] = belief.own();
    for seat in belief.opponents() {
        hands[seat.index()] = belief.pinned(seat);
    }
    hands
}

/// One weighted pass over the unseen cards, most-constrained cards first.
/// Returns None on a dead end (some card has no seat left).
fn draw_once<R: Rng + ?Sized>(belief: &Belief, rng: &mut R) -> Option<[Hand; 4]> {
    let mut hands = seed_hands(belief);
    let order = constrained_order(belief);

    for &card in &order {
        let seat = sample_seat(belief, &hands, card, rng)?;
        hands[seat.index()].add(card);
    }
    Some(hands)
}

/// Rejection-free fallback: repeatedly place forced cards (a single feasible
/// seat), otherwise the card with the smallest feasible set.
fn constructive_draw<R: Rng + ?Sized>(belief: &Belief, rng: &mut R) -> Option<[Hand; 4]> {
    let mut hands = seed_hands(belief);
    let mut pending: Vec<Card> = free_cards(belief).iter().collect();

    while !pending.is_empty() {
        let mut best: Option<(usize, usize)> = None;
        for (index, &card) in pending.iter().enumerate() {
            let feasible = feasible_count(belief, &hands, card);
            if feasible == 0 {
                return None;
            }
            let better = match best {
                None => true,
                Some((_, count)) => feasible < count,
            };
            if better {
                best = Some((index, feasible));
                if feasible == 1 {
                    break;
                }
            }
        }

        let (index, _) = best?;
        let card = pending.swap_remove(index);
        let seat = sample_seat(belief, &hands, card, rng)?;
        hands[seat.index()].add(card);
    }
    Some(hands)
}

fn free_cards(belief: &Belief) -> Hand {
    let mut free = belief.unseen();
    for seat in belief.opponents() {
        free = free.minus(belief.pinned(seat));
    }
    free
}

/// Unassigned cards ordered by ascending degrees of freedom, ties by card id.
fn constrained_order(belief: &Belief) -> Vec<Card> {
    let mut order: Vec<Card> = free_cards(belief).iter().collect();
    order.sort_by_key(|&card| {
        let feasible = belief
            .opponents()
            .iter()
            .filter(|&&seat| belief.prob(card, seat) > 0.0)
            .count();
        (feasible, card.to_id())
    });
    order
}

fn feasible_count(belief: &Belief, hands: &[Hand; 4], card: Card) -> usize {
    belief
        .opponents()
        .iter()
        .filter(|&&seat| {
            belief.prob(card, seat) > 0.0
                && hands[seat.index()].len() < belief.remaining(seat) as usize
        })
        .count()
}

fn sample_seat<R: Rng + ?Sized>(
    belief: &Belief,
    hands: &[Hand; 4],
    card: Card,
    rng: &mut R,
) -> Option<Seat> {
    let mut total = 0.0f64;
    let mut feasible: [Option<(Seat, f64)>; 3] = [None; 3];
    for (slot, &seat) in belief.opponents().iter().enumerate() {
        let weight = belief.prob(card, seat);
        if weight > 0.0 && hands[seat.index()].len() < belief.remaining(seat) as usize {
            feasible[slot] = Some((seat, weight));
            total += weight;
        }
    }

    if total <= 0.0 {
        return None;
    }

    let mut choice = rng.gen_range(0.0..total);
    for entry in feasible.into_iter().flatten() {
        let (seat, weight) = entry;
        if choice <= weight {
            return Some(seat);
        }
        choice -= weight;
    }
    // Floating point slack on the last feasible seat.
    feasible.into_iter().flatten().last().map(|(seat, _)| seat)
}
