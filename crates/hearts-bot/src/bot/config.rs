use mchearts_core::belief::DEFAULT_MAX_RETRIES;
use std::time::Duration;

pub const DEFAULT_N_SAMPLES: usize = 1000;

/// Knobs recognized by the bot. `n_samples` trades latency for variance,
/// `seed` buys full determinism, the rest bound worst-case behavior.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub n_samples: usize,
    pub seed: Option<u64>,
    pub max_retries: usize,
    pub deadline: Option<Duration>,
    pub queen_breaks_hearts: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            n_samples: DEFAULT_N_SAMPLES,
            seed: None,
            max_retries: DEFAULT_MAX_RETRIES,
            deadline: None,
            queen_breaks_hearts: true,
        }
    }
}

impl BotConfig {
    pub fn with_n_samples(mut self, n_samples: usize) -> Self {
        self.n_samples = n_samples.max(1);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_queen_breaks_hearts(mut self, enabled: bool) -> Self {
        self.queen_breaks_hearts = enabled;
        self
    }

    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let n_samples = read("MCH_N_SAMPLES")
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|&value| value > 0)
            .unwrap_or(defaults.n_samples);
        let seed = read("MCH_SEED").and_then(|raw| raw.trim().parse::<u64>().ok());
        let max_retries = read("MCH_MAX_RETRIES")
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|&value| value > 0)
            .unwrap_or(defaults.max_retries);
        let deadline = read("MCH_DEADLINE_MS")
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .map(Duration::from_millis);
        let queen_breaks_hearts = read("MCH_QUEEN_BREAKS_HEARTS")
            .map(|raw| matches!(raw.trim(), "1" | "true" | "TRUE" | "on" | "ON"))
            .unwrap_or(defaults.queen_breaks_hearts);

        Self {
            n_samples,
            seed,
            max_retries,
            deadline,
            queen_breaks_hearts,
        }
    }
}
