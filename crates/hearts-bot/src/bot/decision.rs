//! Expected-point minimization over sampled worlds.

use crate::bot::error::BotError;
use crate::bot::sim;
use crate::policy;
use mchearts_core::belief::{Belief, SampledWorld, WorldSampler};
use mchearts_core::model::card::Card;
use mchearts_core::model::player::Seat;
use mchearts_core::model::round::RoundState;
use mchearts_core::score;
use rand::Rng;
use std::time::Instant;
use tracing::{debug, warn};

/// Points charged to a candidate when its rollout fails outright.
const FAILED_ROLLOUT_POINTS: f64 = 26.0;

#[derive(Debug, Clone, Copy)]
pub struct DecisionParams {
    /// Total Monte Carlo budget, split evenly across the legal moves.
    pub n_samples: usize,
    /// Soft latency cap checked between samples. Every legal move still gets
    /// at least one fully simulated sample.
    pub deadline: Option<Instant>,
}

/// Picks the legal move minimizing the bot's expected round points.
///
/// `base` is the observable round slice: the bot's own hand at `seat`, the
/// trick in progress and the completed-trick history; opponent hands are
/// filled in per sampled world. `scratch` is the reusable simulation buffer.
pub fn decide<R: Rng + ?Sized>(
    base: &RoundState,
    seat: Seat,
    belief: &mut Belief,
    sampler: &WorldSampler,
    rng: &mut R,
    scratch: &mut RoundState,
    params: &DecisionParams,
) -> Result<Card, BotError> {
    let legal = base.legal_plays(seat);
    if legal.is_empty() {
        return Err(BotError::NoLegalMoves);
    }

    if let Some(card) = policy::forced_play(base, seat, legal) {
        debug!(%card, "heuristic override");
        return Ok(card);
    }

    // Tie-break ladder: suit order Clubs < Diamonds < Spades < Hearts, lower
    // rank within the suit. Iterating candidates in that order makes
    // strict-minimum selection below resolve ties for free.
    let mut candidates: Vec<Card> = legal.iter().collect();
    candidates.sort_by_key(|card| (card.suit as u8, card.rank.value()));

    let samples_per_move = (params.n_samples / candidates.len()).max(1);
    let mut totals = vec![0.0f64; candidates.len()];
    let mut counts = vec![0usize; candidates.len()];

    'sampling: for pass in 0..samples_per_move {
        for (index, &candidate) in candidates.iter().enumerate() {
            if pass > 0
                && let Some(deadline) = params.deadline
                && Instant::now() >= deadline
            {
                debug!(pass, "deadline reached; returning best move so far");
                break 'sampling;
            }

            let world = draw_world(belief, sampler, rng)?;
            totals[index] += simulate_candidate(base, seat, candidate, &world, scratch);
            counts[index] += 1;
        }
    }

    let mut best: Option<(Card, f64)> = None;
    for (index, &candidate) in candidates.iter().enumerate() {
        let average = totals[index] / counts[index] as f64;
        if best.is_none_or(|(_, best_average)| average < best_average) {
            best = Some((candidate, average));
        }
    }

    let (card, expectation) = best.expect("at least two candidates were scored");
    debug!(%card, expectation, samples_per_move, "monte carlo decision");
    Ok(card)
}

/// Self's round points after playing `candidate` in `world`, moon transform
/// applied. A rollout that fails scores worst-case.
fn simulate_candidate(
    base: &RoundState,
    seat: Seat,
    candidate: Card,
    world: &SampledWorld,
    scratch: &mut RoundState,
) -> f64 {
    scratch.clone_from(base);
    for other in Seat::LOOP {
        if other != seat {
            scratch.set_hand(other, world.hand(other));
        }
    }

    if let Err(err) = scratch.play_card(seat, candidate) {
        warn!(%candidate, %err, "candidate move rejected in simulation");
        return FAILED_ROLLOUT_POINTS;
    }

    match sim::play_out(scratch) {
        Ok(penalties) => f64::from(score::round_points(penalties)[seat.index()]),
        Err(err) => {
            warn!(%candidate, %err, "rollout failed");
            FAILED_ROLLOUT_POINTS
        }
    }
}

/// One consistent world. On failure the belief is reset to hard constraints
/// and the draw retried once; a second failure is fatal.
fn draw_world<R: Rng + ?Sized>(
    belief: &mut Belief,
    sampler: &WorldSampler,
    rng: &mut R,
) -> Result<SampledWorld, BotError> {
    match sampler.draw(belief, rng) {
        Ok(world) => Ok(world),
        Err(err) => {
            warn!(%err, "sampling failed; resetting soft constraints");
            belief.reset_soft();
            sampler.draw(belief, rng).map_err(BotError::from)
        }
    }
}
