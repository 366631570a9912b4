//! # Learning-Rate Schedulers
//!
//! Pure functions of the epoch: a scheduler never mutates the optimizer
//! and never owns a counter. The training loop asks for the rate at the
//! current epoch and applies it with `Optimizer::set_learning_rate`.
//!
//! ## Schedulers
//!
//! | Type | Rate at epoch `e` |
//! |------|-------------------|
//! | `StepLr` | `base · γ^⌊e / step_size⌋` |
//! | `ExponentialLr` | `base · γ^e` |
//! | `CosineAnnealingLr` | cosine curve from `base` down to `min_rate` |
//! | `WarmupLr` | linear ramp, then an optional inner scheduler |

use std::f64::consts::PI;

/// Epoch-indexed learning-rate policy
pub trait LrScheduler {
    /// Identifier for logging and diagnostics
    fn name(&self) -> &'static str;

    /// Learning rate at `epoch` given the optimizer's base rate
    fn rate(&self, epoch: usize, base_rate: f64) -> f64;
}

/// Multiplies the rate by `gamma` every `step_size` epochs
#[derive(Debug, Clone, Copy)]
pub struct StepLr {
    pub step_size: usize,
    pub gamma: f64,
}

impl StepLr {
    pub fn new(step_size: usize, gamma: f64) -> Self {
        Self { step_size, gamma }
    }
}

impl LrScheduler for StepLr {
    fn name(&self) -> &'static str {
        "step_lr"
    }

    fn rate(&self, epoch: usize, base_rate: f64) -> f64 {
        base_rate * self.gamma.powi((epoch / self.step_size) as i32)
    }
}

/// Multiplies the rate by `gamma` every epoch
#[derive(Debug, Clone, Copy)]
pub struct ExponentialLr {
    pub gamma: f64,
}

impl ExponentialLr {
    pub fn new(gamma: f64) -> Self {
        Self { gamma }
    }
}

impl LrScheduler for ExponentialLr {
    fn name(&self) -> &'static str {
        "exponential_lr"
    }

    fn rate(&self, epoch: usize, base_rate: f64) -> f64 {
        base_rate * self.gamma.powi(epoch as i32)
    }
}

/// Cosine curve from the base rate down to `min_rate` over `max_epochs`
///
/// Epochs beyond `max_epochs` stay at `min_rate`.
#[derive(Debug, Clone, Copy)]
pub struct CosineAnnealingLr {
    pub max_epochs: usize,
    pub min_rate: f64,
}

impl CosineAnnealingLr {
    pub fn new(max_epochs: usize) -> Self {
        Self {
            max_epochs,
            min_rate: 0.0,
        }
    }

    pub fn with_min_rate(mut self, min_rate: f64) -> Self {
        self.min_rate = min_rate;
        self
    }
}

impl LrScheduler for CosineAnnealingLr {
    fn name(&self) -> &'static str {
        "cosine_annealing_lr"
    }

    fn rate(&self, epoch: usize, base_rate: f64) -> f64 {
        if self.max_epochs == 0 || epoch >= self.max_epochs {
            return self.min_rate;
        }
        let progress = epoch as f64 / self.max_epochs as f64;
        self.min_rate + 0.5 * (base_rate - self.min_rate) * (1.0 + (PI * progress).cos())
    }
}

/// Linear warmup over the first `warmup_epochs`, then hands off
///
/// During warmup the rate climbs as `base · (e + 1) / warmup_epochs`.
/// Afterwards the inner scheduler is consulted with a shifted epoch, or
/// the base rate is held flat when there is none.
pub struct WarmupLr {
    pub warmup_epochs: usize,
    inner: Option<Box<dyn LrScheduler>>,
}

impl WarmupLr {
    pub fn new(warmup_epochs: usize) -> Self {
        Self {
            warmup_epochs,
            inner: None,
        }
    }

    pub fn with_inner(mut self, inner: Box<dyn LrScheduler>) -> Self {
        self.inner = Some(inner);
        self
    }
}

impl LrScheduler for WarmupLr {
    fn name(&self) -> &'static str {
        "warmup_lr"
    }

    fn rate(&self, epoch: usize, base_rate: f64) -> f64 {
        if epoch < self.warmup_epochs {
            return base_rate * (epoch + 1) as f64 / self.warmup_epochs as f64;
        }
        match &self.inner {
            Some(inner) => inner.rate(epoch - self.warmup_epochs, base_rate),
            None => base_rate,
        }
    }
}
