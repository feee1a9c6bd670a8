//! Opponent-hand inference: the belief tracker, the marginal reconciliation
//! step that keeps its invariants, and the consistent-world sampler.

mod reconcile;
mod sampler;
mod tracker;

pub use reconcile::{EPSILON, MAX_ITERATIONS};
pub use sampler::{DEFAULT_MAX_RETRIES, SampledWorld, SamplingError, WorldSampler};
pub use tracker::Belief;
