use serde::{Deserialize, Serialize};

use crate::error::{NnError, NnResult};
use crate::optim::scheduler::CosineSchedule;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `total_steps` — hard cap on updates; `None` trains until the source is
///                   exhausted or the error converges
/// - `min_lr`      — lower bound of the cosine learning-rate schedule
/// - `max_lr`      — upper bound, used at the first step of every period
/// - `lr_period`   — schedule period in steps
/// - `min_error`   — early-stopping threshold on a single example's MAE
/// - `log_every`   — progress cadence in steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub total_steps: Option<usize>,
    pub min_lr: f64,
    pub max_lr: f64,
    pub lr_period: usize,
    pub min_error: f64,
    pub log_every: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            total_steps: None,
            min_lr: 0.01,
            max_lr: 0.10,
            lr_period: 100_000,
            min_error: 0.0001,
            log_every: 100,
        }
    }
}

impl TrainConfig {
    pub fn new() -> Self {
        TrainConfig::default()
    }

    pub fn with_total_steps(mut self, total_steps: usize) -> Self {
        self.total_steps = Some(total_steps);
        self
    }

    pub fn with_lr_bounds(mut self, min_lr: f64, max_lr: f64) -> Self {
        self.min_lr = min_lr;
        self.max_lr = max_lr;
        self
    }

    pub fn with_lr_period(mut self, lr_period: usize) -> Self {
        self.lr_period = lr_period;
        self
    }

    pub fn with_min_error(mut self, min_error: f64) -> Self {
        self.min_error = min_error;
        self
    }

    pub fn with_log_every(mut self, log_every: usize) -> Self {
        self.log_every = log_every;
        self
    }

    /// The learning-rate schedule these settings describe.
    pub fn schedule(&self) -> NnResult<CosineSchedule> {
        CosineSchedule::new(self.lr_period, self.min_lr, self.max_lr)
    }

    pub fn validate(&self) -> NnResult<()> {
        self.schedule()?;
        if self.log_every == 0 {
            return Err(NnError::InvalidConfig("log_every must be positive".into()));
        }
        if !self.min_error.is_finite() || self.min_error < 0.0 {
            return Err(NnError::InvalidConfig(format!(
                "min_error must be finite and non-negative, got {}",
                self.min_error
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = TrainConfig::default();
        assert_eq!(c.total_steps, None);
        assert_eq!((c.min_lr, c.max_lr), (0.01, 0.10));
        assert_eq!(c.lr_period, 100_000);
        assert_eq!(c.min_error, 0.0001);
        assert_eq!(c.log_every, 100);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(TrainConfig::new().with_lr_period(0).validate().is_err());
        assert!(TrainConfig::new().with_log_every(0).validate().is_err());
        assert!(TrainConfig::new().with_lr_bounds(0.2, 0.1).validate().is_err());
        assert!(TrainConfig::new().with_lr_bounds(-0.1, 0.1).validate().is_err());
        assert!(TrainConfig::new().with_lr_bounds(0.1, f64::NAN).validate().is_err());
        assert!(TrainConfig::new().with_lr_bounds(0.0, 0.0).validate().is_err());
        assert!(TrainConfig::new().with_min_error(-1.0).validate().is_err());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let c: TrainConfig = serde_json::from_str(r#"{"total_steps": 500}"#).unwrap();
        assert_eq!(c, TrainConfig::new().with_total_steps(500));
    }
}
