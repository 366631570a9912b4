//! # Loss Functions
//!
//! Stateless functors computing a scalar loss and its gradient with
//! respect to the predictions. Both passes require `predictions` and
//! `targets` to share a shape.
//!
//! ## Functions
//!
//! | Functor | Description |
//! |---------|-------------|
//! | `Mse` | Mean Squared Error |
//! | `Mae` | Mean Absolute Error (subgradient, zero at ties) |
//! | `Huber` | quadratic within δ, linear beyond |
//! | `Bce` | binary cross-entropy on probabilities |
//! | `BceWithLogits` | numerically stable log-sum-exp formulation |
//! | `CrossEntropy` | internal row-wise softmax, one-hot targets |
//! | `Nll` | negative log-likelihood on log-probabilities |
//! | `Hinge` | max(0, 1 − y·p) |
//! | `CosineEmbedding` | 1 − cosine similarity |
//!
//! Probabilities in `Bce` are clamped to `[1e-7, 1 − 1e-7]` before the
//! logarithm; this numerical guard is part of the contract, not an error.

use tensa_core::{Element, Tensor};

use crate::error::{Result, TensaMlError};

/// Probability clamp for cross-entropy style losses
const PROB_EPSILON: f64 = 1e-7;

/// Scalar loss + gradient w.r.t. predictions
pub trait Loss<T: Element> {
    /// Identifier for logging and diagnostics
    fn name(&self) -> &'static str;

    /// Scalar loss
    fn forward(&self, predictions: &Tensor<T>, targets: &Tensor<T>) -> Result<T>;

    /// Gradient of the loss with respect to `predictions`
    fn backward(&self, predictions: &Tensor<T>, targets: &Tensor<T>) -> Result<Tensor<T>>;
}

fn require_same_shape<T: Element>(pred: &Tensor<T>, target: &Tensor<T>) -> Result<()> {
    if pred.shape() != target.shape() {
        return Err(TensaMlError::ShapeMismatch {
            expected: format!("{:?}", pred.shape()),
            actual: format!("{:?}", target.shape()),
        });
    }
    Ok(())
}

/// Batch size used by the batched losses: rows for rank 2, 1 otherwise
fn batch_size<T: Element>(t: &Tensor<T>) -> usize {
    if t.rank() == 2 { t.shape()[0] } else { 1 }
}

/// Row-wise numerically stable softmax (over the last axis)
fn stable_softmax<T: Element>(x: &Tensor<T>) -> Tensor<T> {
    let cols = x.shape()[x.rank() - 1];
    let mut out = x.clone();
    for chunk in out.as_mut_slice().chunks_mut(cols) {
        let max = chunk.iter().fold(T::neg_infinity(), |m, &v| m.max(v));
        let mut sum = T::zero();
        for v in chunk.iter_mut() {
            *v = (*v - max).exp();
            sum = sum + *v;
        }
        for v in chunk.iter_mut() {
            *v = *v / sum;
        }
    }
    out
}

/// Mean Squared Error: `(1/n) Σ (p − t)²`
#[derive(Debug, Clone, Copy, Default)]
pub struct Mse;

impl<T: Element> Loss<T> for Mse {
    fn name(&self) -> &'static str {
        "mse"
    }

    fn forward(&self, predictions: &Tensor<T>, targets: &Tensor<T>) -> Result<T> {
        require_same_shape(predictions, targets)?;
        let mut sum = T::zero();
        for (&p, &t) in predictions.as_slice().iter().zip(targets.as_slice()) {
            let d = p - t;
            sum = sum + d * d;
        }
        Ok(sum / T::from_f64(predictions.count() as f64))
    }

    fn backward(&self, predictions: &Tensor<T>, targets: &Tensor<T>) -> Result<Tensor<T>> {
        require_same_shape(predictions, targets)?;
        let scale = T::from_f64(2.0 / predictions.count() as f64);
        Ok(predictions.sub(targets)?.scale(scale))
    }
}

/// Mean Absolute Error: `(1/n) Σ |p − t|`
#[derive(Debug, Clone, Copy, Default)]
pub struct Mae;

impl<T: Element> Loss<T> for Mae {
    fn name(&self) -> &'static str {
        "mae"
    }

    fn forward(&self, predictions: &Tensor<T>, targets: &Tensor<T>) -> Result<T> {
        require_same_shape(predictions, targets)?;
        let mut sum = T::zero();
        for (&p, &t) in predictions.as_slice().iter().zip(targets.as_slice()) {
            sum = sum + (p - t).abs();
        }
        Ok(sum / T::from_f64(predictions.count() as f64))
    }

    fn backward(&self, predictions: &Tensor<T>, targets: &Tensor<T>) -> Result<Tensor<T>> {
        require_same_shape(predictions, targets)?;
        let inv_n = T::from_f64(1.0 / predictions.count() as f64);
        let diff = predictions.sub(targets)?;
        // subgradient: zero at exact ties
        Ok(diff.map(|d| {
            if d > T::zero() {
                inv_n
            } else if d < T::zero() {
                -inv_n
            } else {
                T::zero()
            }
        }))
    }
}

/// Huber loss: quadratic for `|d| ≤ δ`, linear beyond (δ default 1.0)
#[derive(Debug, Clone, Copy)]
pub struct Huber {
    pub delta: f64,
}

impl Huber {
    pub fn new(delta: f64) -> Self {
        Self { delta }
    }
}

impl Default for Huber {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl<T: Element> Loss<T> for Huber {
    fn name(&self) -> &'static str {
        "huber"
    }

    fn forward(&self, predictions: &Tensor<T>, targets: &Tensor<T>) -> Result<T> {
        require_same_shape(predictions, targets)?;
        let delta = T::from_f64(self.delta);
        let half = T::from_f64(0.5);
        let mut sum = T::zero();
        for (&p, &t) in predictions.as_slice().iter().zip(targets.as_slice()) {
            let d = (p - t).abs();
            sum = sum + if d <= delta {
                half * d * d
            } else {
                delta * (d - half * delta)
            };
        }
        Ok(sum / T::from_f64(predictions.count() as f64))
    }

    fn backward(&self, predictions: &Tensor<T>, targets: &Tensor<T>) -> Result<Tensor<T>> {
        require_same_shape(predictions, targets)?;
        let delta = T::from_f64(self.delta);
        let inv_n = T::from_f64(1.0 / predictions.count() as f64);
        let diff = predictions.sub(targets)?;
        Ok(diff.map(|d| {
            if d.abs() <= delta {
                d * inv_n
            } else {
                delta * d.signum() * inv_n
            }
        }))
    }
}

/// Binary cross-entropy on probabilities
#[derive(Debug, Clone, Copy, Default)]
pub struct Bce;

impl<T: Element> Loss<T> for Bce {
    fn name(&self) -> &'static str {
        "bce"
    }

    fn forward(&self, predictions: &Tensor<T>, targets: &Tensor<T>) -> Result<T> {
        require_same_shape(predictions, targets)?;
        let lo = T::from_f64(PROB_EPSILON);
        let hi = T::from_f64(1.0 - PROB_EPSILON);
        let mut sum = T::zero();
        for (&p, &t) in predictions.as_slice().iter().zip(targets.as_slice()) {
            let p = p.max(lo).min(hi);
            sum = sum - (t * p.ln() + (T::one() - t) * (T::one() - p).ln());
        }
        Ok(sum / T::from_f64(predictions.count() as f64))
    }

    fn backward(&self, predictions: &Tensor<T>, targets: &Tensor<T>) -> Result<Tensor<T>> {
        require_same_shape(predictions, targets)?;
        let lo = T::from_f64(PROB_EPSILON);
        let hi = T::from_f64(1.0 - PROB_EPSILON);
        let inv_n = T::from_f64(1.0 / predictions.count() as f64);
        let mut out = predictions.clone();
        for (o, &t) in out.as_mut_slice().iter_mut().zip(targets.as_slice()) {
            let p = (*o).max(lo).min(hi);
            *o = (p - t) / (p * (T::one() - p)) * inv_n;
        }
        Ok(out)
    }
}

/// Binary cross-entropy on raw logits, log-sum-exp formulation
///
/// `loss = max(z, 0) − z·t + ln(1 + e^(−|z|))`, which never
/// exponentiates a large positive argument.
#[derive(Debug, Clone, Copy, Default)]
pub struct BceWithLogits;

impl<T: Element> Loss<T> for BceWithLogits {
    fn name(&self) -> &'static str {
        "bce_with_logits"
    }

    fn forward(&self, predictions: &Tensor<T>, targets: &Tensor<T>) -> Result<T> {
        require_same_shape(predictions, targets)?;
        let mut sum = T::zero();
        for (&z, &t) in predictions.as_slice().iter().zip(targets.as_slice()) {
            sum = sum + z.max(T::zero()) - z * t + (T::one() + (-z.abs()).exp()).ln();
        }
        Ok(sum / T::from_f64(predictions.count() as f64))
    }

    fn backward(&self, predictions: &Tensor<T>, targets: &Tensor<T>) -> Result<Tensor<T>> {
        require_same_shape(predictions, targets)?;
        let inv_n = T::from_f64(1.0 / predictions.count() as f64);
        let mut out = predictions.clone();
        for (o, &t) in out.as_mut_slice().iter_mut().zip(targets.as_slice()) {
            let s = T::one() / (T::one() + (-*o).exp());
            *o = (s - t) * inv_n;
        }
        Ok(out)
    }
}

/// Cross-entropy with an internal row-wise stable softmax
///
/// Expects raw logits and one-hot (or soft) targets; the closed-form
/// gradient `(softmax(pred) − targets) / batch` is valid exactly
/// because the softmax is applied here.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossEntropy;

impl<T: Element> Loss<T> for CrossEntropy {
    fn name(&self) -> &'static str {
        "cross_entropy"
    }

    fn forward(&self, predictions: &Tensor<T>, targets: &Tensor<T>) -> Result<T> {
        require_same_shape(predictions, targets)?;
        let probs = stable_softmax(predictions);
        let lo = T::from_f64(PROB_EPSILON);
        let mut sum = T::zero();
        for (&p, &t) in probs.as_slice().iter().zip(targets.as_slice()) {
            sum = sum - t * p.max(lo).ln();
        }
        Ok(sum / T::from_f64(batch_size(predictions) as f64))
    }

    fn backward(&self, predictions: &Tensor<T>, targets: &Tensor<T>) -> Result<Tensor<T>> {
        require_same_shape(predictions, targets)?;
        let probs = stable_softmax(predictions);
        let scale = T::from_f64(1.0 / batch_size(predictions) as f64);
        Ok(probs.sub(targets)?.scale(scale))
    }
}

/// Negative log-likelihood on log-probabilities and one-hot targets
#[derive(Debug, Clone, Copy, Default)]
pub struct Nll;

impl<T: Element> Loss<T> for Nll {
    fn name(&self) -> &'static str {
        "nll"
    }

    fn forward(&self, predictions: &Tensor<T>, targets: &Tensor<T>) -> Result<T> {
        require_same_shape(predictions, targets)?;
        let mut sum = T::zero();
        for (&p, &t) in predictions.as_slice().iter().zip(targets.as_slice()) {
            sum = sum + p * t;
        }
        Ok(-sum / T::from_f64(batch_size(predictions) as f64))
    }

    fn backward(&self, predictions: &Tensor<T>, targets: &Tensor<T>) -> Result<Tensor<T>> {
        require_same_shape(predictions, targets)?;
        let scale = T::from_f64(-1.0 / batch_size(predictions) as f64);
        Ok(targets.scale(scale))
    }
}

/// Hinge loss: `max(0, 1 − y·p)` with targets in {−1, +1}
#[derive(Debug, Clone, Copy, Default)]
pub struct Hinge;

impl<T: Element> Loss<T> for Hinge {
    fn name(&self) -> &'static str {
        "hinge"
    }

    fn forward(&self, predictions: &Tensor<T>, targets: &Tensor<T>) -> Result<T> {
        require_same_shape(predictions, targets)?;
        let mut sum = T::zero();
        for (&p, &t) in predictions.as_slice().iter().zip(targets.as_slice()) {
            sum = sum + (T::one() - t * p).max(T::zero());
        }
        Ok(sum / T::from_f64(predictions.count() as f64))
    }

    fn backward(&self, predictions: &Tensor<T>, targets: &Tensor<T>) -> Result<Tensor<T>> {
        require_same_shape(predictions, targets)?;
        let inv_n = T::from_f64(1.0 / predictions.count() as f64);
        let mut out = predictions.clone();
        for (o, &t) in out.as_mut_slice().iter_mut().zip(targets.as_slice()) {
            *o = if T::one() - t * *o > T::zero() {
                -t * inv_n
            } else {
                T::zero()
            };
        }
        Ok(out)
    }
}

/// Cosine embedding loss: `1 − cos(pred, target)`
///
/// Tensors are treated as flat vectors. The margin follows the usual
/// constructor signature of the paired-label variant; the reduction
/// here is the similarity form.
#[derive(Debug, Clone, Copy)]
pub struct CosineEmbedding {
    pub margin: f64,
}

impl CosineEmbedding {
    pub fn new(margin: f64) -> Self {
        Self { margin }
    }
}

impl Default for CosineEmbedding {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl<T: Element> Loss<T> for CosineEmbedding {
    fn name(&self) -> &'static str {
        "cosine_embedding"
    }

    fn forward(&self, predictions: &Tensor<T>, targets: &Tensor<T>) -> Result<T> {
        require_same_shape(predictions, targets)?;
        let p = predictions.as_slice();
        let t = targets.as_slice();
        let dot = T::vec_dot(p, t);
        let norm_p = T::vec_dot(p, p).sqrt();
        let norm_t = T::vec_dot(t, t).sqrt();
        let denom = norm_p * norm_t;
        if denom < T::from_f64(1e-10) {
            return Ok(T::one());
        }
        Ok(T::one() - dot / denom)
    }

    fn backward(&self, predictions: &Tensor<T>, targets: &Tensor<T>) -> Result<Tensor<T>> {
        require_same_shape(predictions, targets)?;
        let p = predictions.as_slice();
        let t = targets.as_slice();
        let dot = T::vec_dot(p, t);
        let norm_p = T::vec_dot(p, p).sqrt();
        let norm_t = T::vec_dot(t, t).sqrt();
        let denom = norm_p * norm_t;
        if denom < T::from_f64(1e-10) {
            return Ok(Tensor::zeros(predictions.shape())?);
        }
        // d/dp (1 − cos) = cos·p/|p|² − t/(|p||t|)
        let cos = dot / denom;
        let inv_pp = T::one() / (norm_p * norm_p);
        let inv_pt = T::one() / denom;
        let mut out = predictions.clone();
        for (o, &tv) in out.as_mut_slice().iter_mut().zip(t) {
            *o = cos * *o * inv_pp - tv * inv_pt;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vec1(data: Vec<f64>) -> Tensor<f64> {
        let n = data.len();
        Tensor::from_vec(&[n], data).unwrap()
    }

    /// Central finite difference of the scalar loss at every element
    fn check_gradient<L: Loss<f64>>(loss: &L, pred: &Tensor<f64>, target: &Tensor<f64>) {
        let eps = 1e-6;
        let grad = loss.backward(pred, target).unwrap();
        for i in 0..pred.count() {
            let mut plus = pred.clone();
            plus.as_mut_slice()[i] += eps;
            let mut minus = pred.clone();
            minus.as_mut_slice()[i] -= eps;

            let numeric = (loss.forward(&plus, target).unwrap()
                - loss.forward(&minus, target).unwrap())
                / (2.0 * eps);
            let analytic = grad.as_slice()[i];
            assert!(
                (numeric - analytic).abs() < 1e-4,
                "{}: grad mismatch at {i}: numeric {numeric}, analytic {analytic}",
                loss.name()
            );
        }
    }

    #[test]
    fn test_mse() {
        let p = vec1(vec![1.0, 2.0, 3.0]);
        let t = vec1(vec![1.0, 2.0, 5.0]);
        let loss = Mse.forward(&p, &t).unwrap();
        assert!((loss - 4.0 / 3.0).abs() < 1e-12);

        let g = Mse.backward(&p, &t).unwrap();
        assert!((g.as_slice()[2] - (-4.0 / 3.0)).abs() < 1e-12);
        check_gradient(&Mse, &p, &t);
    }

    #[test]
    fn test_mae_tie_has_zero_subgradient() {
        let p = vec1(vec![1.0, 3.0, 2.0]);
        let t = vec1(vec![1.0, 2.0, 3.0]);
        let g = Mae.backward(&p, &t).unwrap();
        assert_eq!(g.as_slice()[0], 0.0);
        assert!((g.as_slice()[1] - 1.0 / 3.0).abs() < 1e-12);
        assert!((g.as_slice()[2] + 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_huber_regions() {
        let p = vec1(vec![0.5, 3.0]);
        let t = vec1(vec![0.0, 0.0]);
        // 0.5·0.25 quadratic + 1.0·(3 − 0.5) linear, over n=2
        let loss = Huber::default().forward(&p, &t).unwrap();
        assert!((loss - (0.125 + 2.5) / 2.0).abs() < 1e-12);
        check_gradient(&Huber::default(), &vec1(vec![0.3, -0.7, 2.5, -4.0]), &t2());
    }

    fn t2() -> Tensor<f64> {
        vec1(vec![0.0, 0.0, 0.0, 0.0])
    }

    #[test]
    fn test_bce_perfect_prediction_is_small() {
        let p = vec1(vec![1.0, 0.0]);
        let t = vec1(vec![1.0, 0.0]);
        let loss = Bce.forward(&p, &t).unwrap();
        assert!(loss < 1e-5, "loss was {loss}");
        assert!(loss.is_finite()); // clamp prevents log(0)
    }

    #[test]
    fn test_bce_gradient() {
        let p = vec1(vec![0.3, 0.6, 0.9]);
        let t = vec1(vec![0.0, 1.0, 1.0]);
        check_gradient(&Bce, &p, &t);
    }

    #[test]
    fn test_bce_with_logits_matches_bce() {
        let z = vec1(vec![-2.0, -0.5, 0.5, 2.0]);
        let t = vec1(vec![0.0, 1.0, 0.0, 1.0]);
        let p = z.map(|v| 1.0 / (1.0 + (-v).exp()));

        let a = BceWithLogits.forward(&z, &t).unwrap();
        let b = Bce.forward(&p, &t).unwrap();
        assert!((a - b).abs() < 1e-6);
        check_gradient(&BceWithLogits, &z, &t);
    }

    #[test]
    fn test_bce_with_logits_extreme_logits_finite() {
        let z = vec1(vec![-500.0, 500.0]);
        let t = vec1(vec![0.0, 1.0]);
        let loss = BceWithLogits.forward(&z, &t).unwrap();
        assert!(loss.is_finite());
        assert!(loss < 1e-6);
    }

    #[test]
    fn test_cross_entropy_batched() {
        let logits =
            Tensor::<f64>::from_vec(&[2, 3], vec![2.0, 1.0, 0.1, 0.5, 2.5, 0.0]).unwrap();
        let targets =
            Tensor::<f64>::from_vec(&[2, 3], vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0]).unwrap();

        let loss = CrossEntropy.forward(&logits, &targets).unwrap();
        assert!(loss > 0.0);
        check_gradient(&CrossEntropy, &logits, &targets);

        // gradient rows each sum to zero for one-hot targets
        let g = CrossEntropy.backward(&logits, &targets).unwrap();
        let row0: f64 = g.as_slice()[..3].iter().sum();
        assert!(row0.abs() < 1e-9);
    }

    #[test]
    fn test_nll() {
        let logp = vec1(vec![-0.1, -2.0, -3.0]);
        let t = vec1(vec![1.0, 0.0, 0.0]);
        let loss = Nll.forward(&logp, &t).unwrap();
        assert!((loss - 0.1).abs() < 1e-12);

        let g = Nll.backward(&logp, &t).unwrap();
        assert_eq!(g.as_slice(), &[-1.0, 0.0, -0.0]);
    }

    #[test]
    fn test_hinge() {
        let p = vec1(vec![0.5, 2.0]);
        let t = vec1(vec![1.0, 1.0]);
        // margins: max(0, 0.5) + max(0, −1) over n=2
        let loss = Hinge.forward(&p, &t).unwrap();
        assert!((loss - 0.25).abs() < 1e-12);

        let g = Hinge.backward(&p, &t).unwrap();
        assert!((g.as_slice()[0] + 0.5).abs() < 1e-12);
        assert_eq!(g.as_slice()[1], 0.0);
    }

    #[test]
    fn test_cosine_embedding() {
        let p = vec1(vec![1.0, 0.0]);
        let t = vec1(vec![0.0, 1.0]);
        let orthogonal = CosineEmbedding::default().forward(&p, &t).unwrap();
        assert!((orthogonal - 1.0).abs() < 1e-12);

        let same = CosineEmbedding::default().forward(&p, &p).unwrap();
        assert!(same.abs() < 1e-12);

        let pred = vec1(vec![0.8, -0.4, 1.2]);
        let targ = vec1(vec![0.5, 0.5, -0.3]);
        check_gradient(&CosineEmbedding::default(), &pred, &targ);
    }

    #[test]
    fn test_shape_mismatch() {
        let p = vec1(vec![1.0, 2.0]);
        let t = vec1(vec![1.0, 2.0, 3.0]);
        assert!(Mse.forward(&p, &t).is_err());
        assert!(Mse.backward(&p, &t).is_err());
    }
}
