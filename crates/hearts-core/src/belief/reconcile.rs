//! Marginal reconciliation via iterative proportional fitting.
//!
//! After any mutation the belief matrix must satisfy two marginals at once:
//! each unseen card's mass sums to 1 across the opponents, and each opponent's
//! column sums to the number of cards left in that hand. Alternating row
//! normalisation and column scaling (Sinkhorn) restores both. Zero cells
//! (voids) scale to zero and therefore stay pinned throughout.

use crate::model::hand::Hand;
use crate::model::player::Seat;

pub const EPSILON: f64 = 1e-9;
pub const MAX_ITERATIONS: usize = 64;

/// Fits `probs` so rows over `free` cards sum to 1 and opponent columns sum to
/// `targets`. Cells outside `free` are not touched. Returns whether both
/// marginals converged within [`EPSILON`].
pub(crate) fn fit_marginals(
    probs: &mut [[f64; 52]; 4],
    free: Hand,
    opponents: [Seat; 3],
    targets: [f64; 4],
) -> bool {
    if free.is_empty() {
        return true;
    }

    for _ in 0..MAX_ITERATIONS {
        for card in free.iter() {
            let id = card.to_id() as usize;
            let row_sum: f64 = opponents.iter().map(|seat| probs[seat.index()][id]).sum();
            if row_sum > 0.0 {
                for seat in opponents {
                    probs[seat.index()][id] /= row_sum;
                }
            }
        }

        for seat in opponents {
            let target = targets[seat.index()];
            let col_sum: f64 = free.iter().map(|c| probs[seat.index()][c.to_id() as usize]).sum();
            if target <= 0.0 {
                for card in free.iter() {
                    probs[seat.index()][card.to_id() as usize] = 0.0;
                }
            } else if col_sum > 0.0 {
                let scale = target / col_sum;
                for card in free.iter() {
                    probs[seat.index()][card.to_id() as usize] *= scale;
                }
            }
        }

        if deviation(probs, free, opponents, targets) < EPSILON {
            return true;
        }
    }

    false
}

fn deviation(probs: &[[f64; 52]; 4], free: Hand, opponents: [Seat; 3], targets: [f64; 4]) -> f64 {
    let mut max_dev = 0.0f64;
    for card in free.iter() {
        let id = card.to_id() as usize;
        let row_sum: f64 = opponents.iter().map(|seat| probs[seat.index()][id]).sum();
        max_dev = max_dev.max((row_sum - 1.0).abs());
    }
    for seat in opponents {
        let col_sum: f64 = free.iter().map(|c| probs[seat.index()][c.to_id() as usize]).sum();
        max_dev = max_dev.max((col_sum - targets[seat.index()]).abs());
    }
    max_dev
}
