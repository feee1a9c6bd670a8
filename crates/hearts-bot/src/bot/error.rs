use mchearts_core::belief::SamplingError;
use mchearts_core::model::card::Card;
use mchearts_core::model::trick::TrickError;
use thiserror::Error;

/// Fatal decision failures. Recoverable conditions (illegal observations,
/// infeasible samples with a successful fallback) are repaired and logged
/// instead of surfacing here.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("beliefs are not initialized; call init_beliefs first")]
    NotInitialized,
    #[error("a non-empty hand produced no legal plays")]
    NoLegalMoves,
    #[error("own hand disagrees with the observation history around {0}")]
    HandMismatch(Card),
    #[error("observed trick is malformed: {0}")]
    MalformedTrick(#[from] TrickError),
    #[error("beliefs admit no consistent world even after a constraint reset: {0}")]
    BeliefsCorrupt(#[from] SamplingError),
}
