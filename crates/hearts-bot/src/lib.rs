pub mod bot;
pub mod policy;
pub mod telemetry;

pub use bot::decision::{DecisionParams, decide};
pub use bot::{BotConfig, BotError, MonteCarloBot, TableState};
pub use policy::{RolloutPolicy, forced_play};
