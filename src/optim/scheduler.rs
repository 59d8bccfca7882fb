use std::f64::consts::PI;

use crate::error::{NnError, NnResult};

/// Cyclical cosine annealing.
///
/// Returns `max_lr` whenever `step % period == 0`, decays to `min_lr` at the
/// middle of each period and climbs back. Stateless, so steps may be queried
/// in any order.
///
/// # Panics
/// Panics if `period` is 0. [`CosineSchedule::new`] rejects that up front.
pub fn cosine_annealing(step: usize, period: usize, min_lr: f64, max_lr: f64) -> f64 {
    let cos_inner = 2.0 * PI * (step % period) as f64 / period as f64;
    min_lr + 0.5 * (max_lr - min_lr) * (1.0 + cos_inner.cos())
}

/// The bounds and period of a [`cosine_annealing`] schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CosineSchedule {
    period: usize,
    min_lr: f64,
    max_lr: f64,
}

impl CosineSchedule {
    /// Requires a positive period and `0 <= min_lr <= max_lr`, with `max_lr > 0`.
    pub fn new(period: usize, min_lr: f64, max_lr: f64) -> NnResult<CosineSchedule> {
        if period == 0 {
            return Err(NnError::InvalidConfig("lr_period must be positive".into()));
        }
        if !(min_lr.is_finite() && max_lr.is_finite()) || min_lr < 0.0 || max_lr <= 0.0 {
            return Err(NnError::InvalidConfig(format!(
                "learning-rate bounds must be finite, non-negative and not both zero, got [{min_lr}, {max_lr}]"
            )));
        }
        if min_lr > max_lr {
            return Err(NnError::InvalidConfig(format!(
                "min_lr {min_lr} exceeds max_lr {max_lr}"
            )));
        }
        Ok(CosineSchedule { period, min_lr, max_lr })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn min_lr(&self) -> f64 {
        self.min_lr
    }

    pub fn max_lr(&self) -> f64 {
        self.max_lr
    }

    pub fn lr_at(&self, step: usize) -> f64 {
        cosine_annealing(step, self.period, self.min_lr, self.max_lr)
    }
}
