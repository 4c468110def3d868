//! Fallback verdicts for alternatives that are not looked up

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::types::Verdict;

/// Source of verdicts for candidates outside the real-check subset
pub trait FallbackHeuristic: Send + Sync {
    fn draw(&self) -> Verdict;
}

/// Independent Bernoulli draw per candidate
pub struct RandomHeuristic {
    rng: Mutex<Box<dyn RngCore + Send>>,
    available_rate: f64,
}

impl RandomHeuristic {
    /// Entropy-seeded heuristic
    pub fn new(available_rate: f64) -> Self {
        Self::with_rng(StdRng::from_entropy(), available_rate)
    }

    /// Reproducible heuristic for tests
    pub fn seeded(seed: u64, available_rate: f64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), available_rate)
    }

    /// Use any random source. The rate is clamped to `[0, 1]`.
    pub fn with_rng(rng: impl RngCore + Send + 'static, available_rate: f64) -> Self {
        let available_rate = if available_rate.is_nan() {
            0.0
        } else {
            available_rate.clamp(0.0, 1.0)
        };
        Self {
            rng: Mutex::new(Box::new(rng)),
            available_rate,
        }
    }

    pub fn available_rate(&self) -> f64 {
        self.available_rate
    }
}

impl FallbackHeuristic for RandomHeuristic {
    fn draw(&self) -> Verdict {
        Verdict::from(self.rng.lock().gen_bool(self.available_rate))
    }
}
