//! # Optimizers
//!
//! Gradient-descent update rules operating on parallel slices of
//! parameter and gradient tensors. Each optimizer owns its per-parameter
//! state (velocities, moments) and allocates it lazily on the first
//! `step`; the shape of the parameter set is fingerprinted at that point
//! and every later call is validated against it.
//!
//! ## Optimizers
//!
//! | Type | Rule |
//! |------|------|
//! | `Sgd` | plain / momentum / Nesterov, optional L2 weight decay |
//! | `Adam` | bias-corrected first and second moments, optional AMSGrad |
//! | `AdamW` | Adam with decoupled weight decay |
//! | `Rmsprop` | running squared-gradient average, optional centering |
//! | `Adagrad` | per-coordinate accumulated squared gradients |
//!
//! Hyperparameters are held as `f64` and converted once per `step`, so
//! an optimizer value is independent of the element type it updates.
//!
//! ## Gradient Clipping
//!
//! `clip_grad_norm` rescales a gradient set to a global L2 norm bound;
//! `clip_grad_value` clamps each coordinate. Both run before `step`.

use serde::{Deserialize, Serialize};
use tensa_core::{Element, Tensor};

use crate::error::{Result, TensaMlError};

/// Parameter-set shape signature, recorded on the first step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ParamFingerprint {
    shapes: Vec<Vec<usize>>,
}

impl ParamFingerprint {
    fn is_recorded(&self) -> bool {
        !self.shapes.is_empty()
    }

    fn record<T: Element>(&mut self, params: &[Tensor<T>]) {
        self.shapes = params.iter().map(|p| p.shape().to_vec()).collect();
    }

    fn check<T: Element>(&self, params: &[Tensor<T>]) -> Result<()> {
        if params.len() != self.shapes.len() {
            return Err(TensaMlError::ParameterSetChanged(format!(
                "expected {} parameter tensors, got {}",
                self.shapes.len(),
                params.len()
            )));
        }
        for (i, (p, s)) in params.iter().zip(&self.shapes).enumerate() {
            if p.shape() != s.as_slice() {
                return Err(TensaMlError::ParameterSetChanged(format!(
                    "parameter {i} changed shape from {:?} to {:?}",
                    s,
                    p.shape()
                )));
            }
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.shapes.clear();
    }
}

/// Validates the params/grads pairing and the recorded fingerprint
fn validate_step<T: Element>(
    fingerprint: &mut ParamFingerprint,
    params: &[Tensor<T>],
    grads: &[Tensor<T>],
) -> Result<()> {
    if params.len() != grads.len() {
        return Err(TensaMlError::ParameterCountMismatch {
            params: params.len(),
            grads: grads.len(),
        });
    }
    for (i, (p, g)) in params.iter().zip(grads).enumerate() {
        if p.shape() != g.shape() {
            return Err(TensaMlError::ShapeMismatch {
                expected: format!("parameter {i}: {:?}", p.shape()),
                actual: format!("gradient {i}: {:?}", g.shape()),
            });
        }
    }
    if fingerprint.is_recorded() {
        fingerprint.check(params)?;
    } else {
        fingerprint.record(params);
    }
    Ok(())
}

/// In-place parameter update rule
pub trait Optimizer<T: Element> {
    /// Identifier for logging and diagnostics
    fn name(&self) -> &'static str;

    /// Current base learning rate
    fn learning_rate(&self) -> f64;

    /// Replaces the base learning rate (scheduler hook)
    fn set_learning_rate(&mut self, rate: f64);

    /// Applies one update to every parameter tensor
    fn step(&mut self, params: &mut [Tensor<T>], grads: &[Tensor<T>]) -> Result<()>;

    /// Discards accumulated state and the parameter fingerprint
    fn reset(&mut self);
}

/// Stochastic gradient descent with optional momentum and Nesterov lookahead
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "T: Element")]
pub struct Sgd<T: Element> {
    learning_rate: f64,
    momentum: f64,
    nesterov: bool,
    weight_decay: f64,
    velocity: Vec<Tensor<T>>,
    fingerprint: ParamFingerprint,
}

impl<T: Element> Sgd<T> {
    pub fn new(learning_rate: f64) -> Self {
        Self {
            learning_rate,
            momentum: 0.0,
            nesterov: false,
            weight_decay: 0.0,
            velocity: Vec::new(),
            fingerprint: ParamFingerprint::default(),
        }
    }

    pub fn with_momentum(mut self, momentum: f64) -> Self {
        self.momentum = momentum;
        self
    }

    pub fn with_nesterov(mut self, nesterov: bool) -> Self {
        self.nesterov = nesterov;
        self
    }

    pub fn with_weight_decay(mut self, weight_decay: f64) -> Self {
        self.weight_decay = weight_decay;
        self
    }
}

impl<T: Element> Optimizer<T> for Sgd<T> {
    fn name(&self) -> &'static str {
        "sgd"
    }

    fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    fn set_learning_rate(&mut self, rate: f64) {
        self.learning_rate = rate;
    }

    fn step(&mut self, params: &mut [Tensor<T>], grads: &[Tensor<T>]) -> Result<()> {
        validate_step(&mut self.fingerprint, params, grads)?;
        if self.momentum != 0.0 && self.velocity.is_empty() {
            self.velocity = params
                .iter()
                .map(|p| Tensor::zeros(p.shape()))
                .collect::<tensa_core::Result<_>>()?;
        }

        let lr = T::from_f64(self.learning_rate);
        let mu = T::from_f64(self.momentum);
        let wd = T::from_f64(self.weight_decay);

        for (i, (param, grad)) in params.iter_mut().zip(grads).enumerate() {
            let p = param.as_mut_slice();
            let g = grad.as_slice();
            if self.momentum == 0.0 {
                for (pj, &gj) in p.iter_mut().zip(g) {
                    let gj = gj + wd * *pj;
                    *pj = *pj - lr * gj;
                }
            } else {
                let v = self.velocity[i].as_mut_slice();
                for ((pj, &gj), vj) in p.iter_mut().zip(g).zip(v) {
                    let gj = gj + wd * *pj;
                    *vj = mu * *vj + gj;
                    let update = if self.nesterov { gj + mu * *vj } else { *vj };
                    *pj = *pj - lr * update;
                }
            }
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.velocity.clear();
        self.fingerprint.clear();
    }
}

/// Adam with bias-corrected moment estimates
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "T: Element")]
pub struct Adam<T: Element> {
    learning_rate: f64,
    beta1: f64,
    beta2: f64,
    epsilon: f64,
    weight_decay: f64,
    amsgrad: bool,
    m: Vec<Tensor<T>>,
    v: Vec<Tensor<T>>,
    vhat_max: Vec<Tensor<T>>,
    t: u64,
    fingerprint: ParamFingerprint,
}

impl<T: Element> Adam<T> {
    pub fn new(learning_rate: f64) -> Self {
        Self {
            learning_rate,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
            weight_decay: 0.0,
            amsgrad: false,
            m: Vec::new(),
            v: Vec::new(),
            vhat_max: Vec::new(),
            t: 0,
            fingerprint: ParamFingerprint::default(),
        }
    }

    pub fn with_betas(mut self, beta1: f64, beta2: f64) -> Self {
        self.beta1 = beta1;
        self.beta2 = beta2;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_weight_decay(mut self, weight_decay: f64) -> Self {
        self.weight_decay = weight_decay;
        self
    }

    pub fn with_amsgrad(mut self, amsgrad: bool) -> Self {
        self.amsgrad = amsgrad;
        self
    }

    fn ensure_state(&mut self, params: &[Tensor<T>]) -> Result<()> {
        if self.m.is_empty() {
            let zeros = |p: &Tensor<T>| Tensor::zeros(p.shape());
            self.m = params.iter().map(zeros).collect::<tensa_core::Result<_>>()?;
            self.v = params.iter().map(zeros).collect::<tensa_core::Result<_>>()?;
            if self.amsgrad {
                self.vhat_max = params.iter().map(zeros).collect::<tensa_core::Result<_>>()?;
            }
        }
        Ok(())
    }
}

impl<T: Element> Optimizer<T> for Adam<T> {
    fn name(&self) -> &'static str {
        "adam"
    }

    fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    fn set_learning_rate(&mut self, rate: f64) {
        self.learning_rate = rate;
    }

    fn step(&mut self, params: &mut [Tensor<T>], grads: &[Tensor<T>]) -> Result<()> {
        validate_step(&mut self.fingerprint, params, grads)?;
        self.ensure_state(params)?;
        self.t += 1;

        let lr = T::from_f64(self.learning_rate);
        let b1 = T::from_f64(self.beta1);
        let b2 = T::from_f64(self.beta2);
        let eps = T::from_f64(self.epsilon);
        let wd = T::from_f64(self.weight_decay);
        let bc1 = T::from_f64(1.0 - self.beta1.powi(self.t as i32));
        let bc2 = T::from_f64(1.0 - self.beta2.powi(self.t as i32));

        for (i, (param, grad)) in params.iter_mut().zip(grads).enumerate() {
            let p = param.as_mut_slice();
            let g = grad.as_slice();
            let m = self.m[i].as_mut_slice();
            let v = self.v[i].as_mut_slice();
            for j in 0..p.len() {
                let gj = g[j] + wd * p[j];
                m[j] = b1 * m[j] + (T::one() - b1) * gj;
                v[j] = b2 * v[j] + (T::one() - b2) * gj * gj;
                let m_hat = m[j] / bc1;
                let mut v_hat = v[j] / bc2;
                if self.amsgrad {
                    let vmax = &mut self.vhat_max[i].as_mut_slice()[j];
                    *vmax = vmax.max(v_hat);
                    v_hat = *vmax;
                }
                p[j] = p[j] - lr * m_hat / (v_hat.sqrt() + eps);
            }
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.m.clear();
        self.v.clear();
        self.vhat_max.clear();
        self.t = 0;
        self.fingerprint.clear();
    }
}

/// Adam with decoupled weight decay
///
/// Decay is applied directly to the parameters before the moment
/// update instead of being folded into the gradient.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "T: Element")]
pub struct AdamW<T: Element> {
    inner: Adam<T>,
    weight_decay: f64,
}

impl<T: Element> AdamW<T> {
    pub fn new(learning_rate: f64) -> Self {
        Self {
            inner: Adam::new(learning_rate),
            weight_decay: 0.01,
        }
    }

    pub fn with_betas(mut self, beta1: f64, beta2: f64) -> Self {
        self.inner = self.inner.with_betas(beta1, beta2);
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.inner = self.inner.with_epsilon(epsilon);
        self
    }

    pub fn with_weight_decay(mut self, weight_decay: f64) -> Self {
        self.weight_decay = weight_decay;
        self
    }

    pub fn with_amsgrad(mut self, amsgrad: bool) -> Self {
        self.inner = self.inner.with_amsgrad(amsgrad);
        self
    }
}

impl<T: Element> Optimizer<T> for AdamW<T> {
    fn name(&self) -> &'static str {
        "adamw"
    }

    fn learning_rate(&self) -> f64 {
        self.inner.learning_rate()
    }

    fn set_learning_rate(&mut self, rate: f64) {
        self.inner.set_learning_rate(rate);
    }

    fn step(&mut self, params: &mut [Tensor<T>], grads: &[Tensor<T>]) -> Result<()> {
        if self.weight_decay != 0.0 {
            let shrink = T::from_f64(1.0 - self.inner.learning_rate * self.weight_decay);
            for param in params.iter_mut() {
                for pj in param.as_mut_slice() {
                    *pj = *pj * shrink;
                }
            }
        }
        self.inner.step(params, grads)
    }

    fn reset(&mut self) {
        self.inner.reset();
    }
}

/// RMSprop with optional momentum and gradient centering
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "T: Element")]
pub struct Rmsprop<T: Element> {
    learning_rate: f64,
    alpha: f64,
    epsilon: f64,
    momentum: f64,
    centered: bool,
    sq_avg: Vec<Tensor<T>>,
    grad_avg: Vec<Tensor<T>>,
    velocity: Vec<Tensor<T>>,
    fingerprint: ParamFingerprint,
}

impl<T: Element> Rmsprop<T> {
    pub fn new(learning_rate: f64) -> Self {
        Self {
            learning_rate,
            alpha: 0.99,
            epsilon: 1e-8,
            momentum: 0.0,
            centered: false,
            sq_avg: Vec::new(),
            grad_avg: Vec::new(),
            velocity: Vec::new(),
            fingerprint: ParamFingerprint::default(),
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_momentum(mut self, momentum: f64) -> Self {
        self.momentum = momentum;
        self
    }

    pub fn with_centered(mut self, centered: bool) -> Self {
        self.centered = centered;
        self
    }
}

impl<T: Element> Optimizer<T> for Rmsprop<T> {
    fn name(&self) -> &'static str {
        "rmsprop"
    }

    fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    fn set_learning_rate(&mut self, rate: f64) {
        self.learning_rate = rate;
    }

    fn step(&mut self, params: &mut [Tensor<T>], grads: &[Tensor<T>]) -> Result<()> {
        validate_step(&mut self.fingerprint, params, grads)?;
        if self.sq_avg.is_empty() {
            let zeros = |p: &Tensor<T>| Tensor::zeros(p.shape());
            self.sq_avg = params.iter().map(zeros).collect::<tensa_core::Result<_>>()?;
            if self.centered {
                self.grad_avg = params.iter().map(zeros).collect::<tensa_core::Result<_>>()?;
            }
            if self.momentum != 0.0 {
                self.velocity = params.iter().map(zeros).collect::<tensa_core::Result<_>>()?;
            }
        }

        let lr = T::from_f64(self.learning_rate);
        let alpha = T::from_f64(self.alpha);
        let eps = T::from_f64(self.epsilon);
        let mu = T::from_f64(self.momentum);

        for (i, (param, grad)) in params.iter_mut().zip(grads).enumerate() {
            let p = param.as_mut_slice();
            let g = grad.as_slice();
            let sq = self.sq_avg[i].as_mut_slice();
            for j in 0..p.len() {
                let gj = g[j];
                sq[j] = alpha * sq[j] + (T::one() - alpha) * gj * gj;
                let denom_sq = if self.centered {
                    let ga = &mut self.grad_avg[i].as_mut_slice()[j];
                    *ga = alpha * *ga + (T::one() - alpha) * gj;
                    (sq[j] - *ga * *ga).max(T::zero())
                } else {
                    sq[j]
                };
                let update = gj / (denom_sq.sqrt() + eps);
                if self.momentum != 0.0 {
                    let vj = &mut self.velocity[i].as_mut_slice()[j];
                    *vj = mu * *vj + update;
                    p[j] = p[j] - lr * *vj;
                } else {
                    p[j] = p[j] - lr * update;
                }
            }
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.sq_avg.clear();
        self.grad_avg.clear();
        self.velocity.clear();
        self.fingerprint.clear();
    }
}

/// Adagrad with per-coordinate accumulated squared gradients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "T: Element")]
pub struct Adagrad<T: Element> {
    learning_rate: f64,
    epsilon: f64,
    weight_decay: f64,
    sum_sq: Vec<Tensor<T>>,
    fingerprint: ParamFingerprint,
}

impl<T: Element> Adagrad<T> {
    pub fn new(learning_rate: f64) -> Self {
        Self {
            learning_rate,
            epsilon: 1e-10,
            weight_decay: 0.0,
            sum_sq: Vec::new(),
            fingerprint: ParamFingerprint::default(),
        }
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_weight_decay(mut self, weight_decay: f64) -> Self {
        self.weight_decay = weight_decay;
        self
    }
}

impl<T: Element> Optimizer<T> for Adagrad<T> {
    fn name(&self) -> &'static str {
        "adagrad"
    }

    fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    fn set_learning_rate(&mut self, rate: f64) {
        self.learning_rate = rate;
    }

    fn step(&mut self, params: &mut [Tensor<T>], grads: &[Tensor<T>]) -> Result<()> {
        validate_step(&mut self.fingerprint, params, grads)?;
        if self.sum_sq.is_empty() {
            self.sum_sq = params
                .iter()
                .map(|p| Tensor::zeros(p.shape()))
                .collect::<tensa_core::Result<_>>()?;
        }

        let lr = T::from_f64(self.learning_rate);
        let eps = T::from_f64(self.epsilon);
        let wd = T::from_f64(self.weight_decay);

        for (i, (param, grad)) in params.iter_mut().zip(grads).enumerate() {
            let p = param.as_mut_slice();
            let g = grad.as_slice();
            let acc = self.sum_sq[i].as_mut_slice();
            for j in 0..p.len() {
                let gj = g[j] + wd * p[j];
                acc[j] = acc[j] + gj * gj;
                p[j] = p[j] - lr * gj / (acc[j].sqrt() + eps);
            }
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.sum_sq.clear();
        self.fingerprint.clear();
    }
}

/// Rescales the gradient set so its global L2 norm is at most `max_norm`
///
/// Returns the norm measured before clipping.
pub fn clip_grad_norm<T: Element>(grads: &mut [Tensor<T>], max_norm: f64) -> Result<f64> {
    if max_norm <= 0.0 {
        return Err(TensaMlError::InvalidArgument(format!(
            "max_norm must be positive, got {max_norm}"
        )));
    }
    let mut total = T::zero();
    for g in grads.iter() {
        let s = g.as_slice();
        total = total + T::vec_dot(s, s);
    }
    let norm = total.sqrt().to_f64();
    if norm > max_norm {
        let scale = T::from_f64(max_norm / norm);
        for g in grads.iter_mut() {
            for v in g.as_mut_slice() {
                *v = *v * scale;
            }
        }
    }
    Ok(norm)
}

/// Clamps every gradient coordinate into `[-max_value, max_value]`
pub fn clip_grad_value<T: Element>(grads: &mut [Tensor<T>], max_value: f64) -> Result<()> {
    if max_value <= 0.0 {
        return Err(TensaMlError::InvalidArgument(format!(
            "max_value must be positive, got {max_value}"
        )));
    }
    let lo = T::from_f64(-max_value);
    let hi = T::from_f64(max_value);
    for g in grads.iter_mut() {
        for v in g.as_mut_slice() {
            *v = v.max(lo).min(hi);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params_and_grads() -> (Vec<Tensor<f64>>, Vec<Tensor<f64>>) {
        let p = vec![Tensor::from_vec(&[3], vec![1.0, 2.0, 3.0]).unwrap()];
        let g = vec![Tensor::from_vec(&[3], vec![0.1, -0.2, 0.3]).unwrap()];
        (p, g)
    }

    #[test]
    fn test_sgd_plain_update() {
        let (mut params, grads) = params_and_grads();
        let mut opt = Sgd::new(0.1);
        opt.step(&mut params, &grads).unwrap();
        let expected = [1.0 - 0.01, 2.0 + 0.02, 3.0 - 0.03];
        for (a, e) in params[0].as_slice().iter().zip(expected) {
            assert!((a - e).abs() < 1e-12);
        }
    }

    #[test]
    fn test_sgd_momentum_accumulates() {
        let (mut params, grads) = params_and_grads();
        let mut opt = Sgd::new(0.1).with_momentum(0.9);
        opt.step(&mut params, &grads).unwrap();
        opt.step(&mut params, &grads).unwrap();
        // v1 = g, v2 = 0.9g + g = 1.9g; total step 2.9·lr·g
        let expected = 1.0 - 0.1 * 2.9 * 0.1;
        assert!((params[0].as_slice()[0] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_adam_first_step_approaches_signed_rate() {
        let (mut params, grads) = params_and_grads();
        let before = params[0].clone();
        let mut opt = Adam::new(0.001);
        opt.step(&mut params, &grads).unwrap();
        // bias correction makes the first step ≈ lr·sign(g)
        for i in 0..3 {
            let delta = params[0].as_slice()[i] - before.as_slice()[i];
            let expected = -0.001 * grads[0].as_slice()[i].signum();
            assert!((delta - expected).abs() < 1e-5, "delta {delta}");
        }
    }

    #[test]
    fn test_adamw_decays_even_with_zero_gradient() {
        let mut params = vec![Tensor::from_vec(&[2], vec![10.0, -10.0]).unwrap()];
        let grads = vec![Tensor::<f64>::zeros(&[2]).unwrap()];
        let mut opt = AdamW::new(0.1).with_weight_decay(0.5);
        opt.step(&mut params, &grads).unwrap();
        // decoupled decay shrinks by 1 − lr·wd = 0.95
        assert!((params[0].as_slice()[0] - 9.5).abs() < 1e-12);
        assert!((params[0].as_slice()[1] + 9.5).abs() < 1e-12);
    }

    #[test]
    fn test_rmsprop_reduces_loss_on_quadratic() {
        // minimize f(x) = x², gradient 2x
        let mut params = vec![Tensor::<f64>::from_vec(&[1], vec![5.0]).unwrap()];
        let mut opt = Rmsprop::new(0.01);
        for _ in 0..200 {
            let grads = vec![params[0].scale(2.0)];
            opt.step(&mut params, &grads).unwrap();
        }
        assert!(params[0].as_slice()[0].abs() < 5.0 * 0.5);
    }

    #[test]
    fn test_adagrad_monotone_rate_decay() {
        let (mut params, grads) = params_and_grads();
        let mut opt = Adagrad::new(0.5);
        let p0 = params[0].as_slice()[0];
        opt.step(&mut params, &grads).unwrap();
        let step1 = (params[0].as_slice()[0] - p0).abs();
        let p1 = params[0].as_slice()[0];
        opt.step(&mut params, &grads).unwrap();
        let step2 = (params[0].as_slice()[0] - p1).abs();
        assert!(step2 < step1);
    }

    #[test]
    fn test_fingerprint_rejects_shape_change() {
        let (mut params, grads) = params_and_grads();
        let mut opt = Sgd::<f64>::new(0.1).with_momentum(0.9);
        opt.step(&mut params, &grads).unwrap();

        let mut other = vec![Tensor::<f64>::zeros(&[4]).unwrap()];
        let other_grads = vec![Tensor::<f64>::zeros(&[4]).unwrap()];
        let err = opt.step(&mut other, &other_grads).unwrap_err();
        assert!(matches!(err, TensaMlError::ParameterSetChanged(_)));
    }

    #[test]
    fn test_fingerprint_rejects_count_change() {
        let (mut params, grads) = params_and_grads();
        let mut opt = Adam::<f64>::new(0.001);
        opt.step(&mut params, &grads).unwrap();

        let mut two = vec![
            Tensor::<f64>::zeros(&[3]).unwrap(),
            Tensor::<f64>::zeros(&[3]).unwrap(),
        ];
        let two_grads = two.clone();
        assert!(opt.step(&mut two, &two_grads).is_err());
    }

    #[test]
    fn test_reset_clears_fingerprint() {
        let (mut params, grads) = params_and_grads();
        let mut opt = Adam::<f64>::new(0.001);
        opt.step(&mut params, &grads).unwrap();
        opt.reset();

        let mut other = vec![Tensor::<f64>::zeros(&[5]).unwrap()];
        let other_grads = vec![Tensor::<f64>::zeros(&[5]).unwrap()];
        assert!(opt.step(&mut other, &other_grads).is_ok());
    }

    #[test]
    fn test_param_grad_count_mismatch() {
        let (mut params, _) = params_and_grads();
        let mut opt = Sgd::<f64>::new(0.1);
        let err = opt.step(&mut params, &[]).unwrap_err();
        assert!(matches!(err, TensaMlError::ParameterCountMismatch { .. }));
    }

    #[test]
    fn test_clip_grad_norm() {
        let mut grads = vec![Tensor::<f64>::from_vec(&[2], vec![3.0, 4.0]).unwrap()];
        let norm = clip_grad_norm(&mut grads, 1.0).unwrap();
        assert!((norm - 5.0).abs() < 1e-12);
        assert!((grads[0].as_slice()[0] - 0.6).abs() < 1e-12);
        assert!((grads[0].as_slice()[1] - 0.8).abs() < 1e-12);

        // already within bound: untouched
        let mut small = vec![Tensor::<f64>::from_vec(&[2], vec![0.1, 0.1]).unwrap()];
        clip_grad_norm(&mut small, 1.0).unwrap();
        assert_eq!(small[0].as_slice(), &[0.1, 0.1]);
    }

    #[test]
    fn test_clip_grad_value() {
        let mut grads = vec![Tensor::<f64>::from_vec(&[3], vec![-5.0, 0.5, 5.0]).unwrap()];
        clip_grad_value(&mut grads, 1.0).unwrap();
        assert_eq!(grads[0].as_slice(), &[-1.0, 0.5, 1.0]);
    }
}
