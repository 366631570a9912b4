//! # Activation Functions
//!
//! Stateless forward/backward functors on tensors.
//!
//! ## Functions
//!
//! | Functor | forward | backward (× upstream) |
//! |---------|---------|-----------------------|
//! | `Relu` | max(0, x) | 1 if x > 0 else 0 |
//! | `LeakyRelu` | x or αx | 1 or α |
//! | `Elu` | x or α(eˣ−1) | 1 or αeˣ |
//! | `Selu` | λ·ELU(α) | λ·(1 or αeˣ) |
//! | `Sigmoid` | 1/(1+e⁻ˣ) | s(1−s) |
//! | `TanhAct` | tanh(x) | 1−t² |
//! | `Softmax` | shift-by-max, normalize | per-row Jacobian-vector product |
//! | `Swish` | x·σ(x) | swish + σ(1−swish) |
//! | `Gelu` | tanh approximation | exact derivative of the approximation |
//! | `Softplus` | ln(1+eˣ) | σ(x) |
//! | `Linear` | x | upstream |
//!
//! `backward(x, upstream)` returns the gradient with respect to `x`
//! given the gradient with respect to the output; the two arguments
//! must share a shape.

use tensa_core::{Element, Tensor};

use crate::error::{Result, TensaMlError};

/// Stateless forward/backward activation functor
pub trait Activation<T: Element> {
    /// Identifier for logging and diagnostics
    fn name(&self) -> &'static str;

    /// Apply the activation elementwise
    fn forward(&self, x: &Tensor<T>) -> Tensor<T>;

    /// Gradient with respect to `x`, given the upstream gradient
    fn backward(&self, x: &Tensor<T>, upstream: &Tensor<T>) -> Result<Tensor<T>>;
}

fn require_same_shape<T: Element>(x: &Tensor<T>, upstream: &Tensor<T>) -> Result<()> {
    if x.shape() != upstream.shape() {
        return Err(TensaMlError::ShapeMismatch {
            expected: format!("{:?}", x.shape()),
            actual: format!("{:?}", upstream.shape()),
        });
    }
    Ok(())
}

/// Elementwise `g(x_i, u_i)` over an input/upstream pair
fn zip_map<T: Element, F: Fn(T, T) -> T>(x: &Tensor<T>, upstream: &Tensor<T>, f: F) -> Tensor<T> {
    let mut out = x.clone();
    for (o, &u) in out.as_mut_slice().iter_mut().zip(upstream.as_slice()) {
        *o = f(*o, u);
    }
    out
}

#[inline]
fn sigmoid_scalar<T: Element>(v: T) -> T {
    T::one() / (T::one() + (-v).exp())
}

/// Rectified Linear Unit: max(0, x)
#[derive(Debug, Clone, Copy, Default)]
pub struct Relu;

impl<T: Element> Activation<T> for Relu {
    fn name(&self) -> &'static str {
        "relu"
    }

    fn forward(&self, x: &Tensor<T>) -> Tensor<T> {
        x.map(|v| v.max(T::zero()))
    }

    fn backward(&self, x: &Tensor<T>, upstream: &Tensor<T>) -> Result<Tensor<T>> {
        require_same_shape(x, upstream)?;
        Ok(zip_map(x, upstream, |v, u| {
            if v > T::zero() { u } else { T::zero() }
        }))
    }
}

/// Leaky ReLU with negative slope α (default 0.01)
#[derive(Debug, Clone, Copy)]
pub struct LeakyRelu {
    pub alpha: f64,
}

impl LeakyRelu {
    pub fn new(alpha: f64) -> Self {
        Self { alpha }
    }
}

impl Default for LeakyRelu {
    fn default() -> Self {
        Self::new(0.01)
    }
}

impl<T: Element> Activation<T> for LeakyRelu {
    fn name(&self) -> &'static str {
        "leaky_relu"
    }

    fn forward(&self, x: &Tensor<T>) -> Tensor<T> {
        let a = T::from_f64(self.alpha);
        x.map(|v| if v > T::zero() { v } else { a * v })
    }

    fn backward(&self, x: &Tensor<T>, upstream: &Tensor<T>) -> Result<Tensor<T>> {
        require_same_shape(x, upstream)?;
        let a = T::from_f64(self.alpha);
        Ok(zip_map(x, upstream, |v, u| {
            if v > T::zero() { u } else { a * u }
        }))
    }
}

/// Exponential Linear Unit: x if x > 0, α(eˣ−1) otherwise (α default 1.0)
#[derive(Debug, Clone, Copy)]
pub struct Elu {
    pub alpha: f64,
}

impl Elu {
    pub fn new(alpha: f64) -> Self {
        Self { alpha }
    }
}

impl Default for Elu {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl<T: Element> Activation<T> for Elu {
    fn name(&self) -> &'static str {
        "elu"
    }

    fn forward(&self, x: &Tensor<T>) -> Tensor<T> {
        let a = T::from_f64(self.alpha);
        x.map(|v| {
            if v > T::zero() {
                v
            } else {
                a * (v.exp() - T::one())
            }
        })
    }

    fn backward(&self, x: &Tensor<T>, upstream: &Tensor<T>) -> Result<Tensor<T>> {
        require_same_shape(x, upstream)?;
        let a = T::from_f64(self.alpha);
        Ok(zip_map(x, upstream, |v, u| {
            if v > T::zero() { u } else { a * v.exp() * u }
        }))
    }
}

/// Scaled ELU with the self-normalizing constants
#[derive(Debug, Clone, Copy, Default)]
pub struct Selu;

impl Selu {
    pub const ALPHA: f64 = 1.6732632423543772;
    pub const LAMBDA: f64 = 1.0507009873554805;
}

impl<T: Element> Activation<T> for Selu {
    fn name(&self) -> &'static str {
        "selu"
    }

    fn forward(&self, x: &Tensor<T>) -> Tensor<T> {
        let a = T::from_f64(Self::ALPHA);
        let l = T::from_f64(Self::LAMBDA);
        x.map(|v| {
            if v > T::zero() {
                l * v
            } else {
                l * a * (v.exp() - T::one())
            }
        })
    }

    fn backward(&self, x: &Tensor<T>, upstream: &Tensor<T>) -> Result<Tensor<T>> {
        require_same_shape(x, upstream)?;
        let a = T::from_f64(Self::ALPHA);
        let l = T::from_f64(Self::LAMBDA);
        Ok(zip_map(x, upstream, |v, u| {
            if v > T::zero() {
                l * u
            } else {
                l * a * v.exp() * u
            }
        }))
    }
}

/// Logistic sigmoid: 1 / (1 + e⁻ˣ)
#[derive(Debug, Clone, Copy, Default)]
pub struct Sigmoid;

impl<T: Element> Activation<T> for Sigmoid {
    fn name(&self) -> &'static str {
        "sigmoid"
    }

    fn forward(&self, x: &Tensor<T>) -> Tensor<T> {
        x.map(sigmoid_scalar)
    }

    fn backward(&self, x: &Tensor<T>, upstream: &Tensor<T>) -> Result<Tensor<T>> {
        require_same_shape(x, upstream)?;
        Ok(zip_map(x, upstream, |v, u| {
            let s = sigmoid_scalar(v);
            s * (T::one() - s) * u
        }))
    }
}

/// Hyperbolic tangent
#[derive(Debug, Clone, Copy, Default)]
pub struct TanhAct;

impl<T: Element> Activation<T> for TanhAct {
    fn name(&self) -> &'static str {
        "tanh"
    }

    fn forward(&self, x: &Tensor<T>) -> Tensor<T> {
        x.map(|v| v.tanh())
    }

    fn backward(&self, x: &Tensor<T>, upstream: &Tensor<T>) -> Result<Tensor<T>> {
        require_same_shape(x, upstream)?;
        Ok(zip_map(x, upstream, |v, u| {
            let t = v.tanh();
            (T::one() - t * t) * u
        }))
    }
}

/// Softmax over the last axis
///
/// Forward shifts by the row maximum for stability and normalizes each
/// last-axis slice to sum to one. Backward is the per-row
/// Jacobian-vector product `g_i = s_i (u_i − Σ_j u_j s_j)`, applied to
/// the same last-axis slices, so rank-1 vectors and rank-2 batches get
/// consistent gradients.
#[derive(Debug, Clone, Copy, Default)]
pub struct Softmax;

impl<T: Element> Activation<T> for Softmax {
    fn name(&self) -> &'static str {
        "softmax"
    }

    fn forward(&self, x: &Tensor<T>) -> Tensor<T> {
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

    fn backward(&self, x: &Tensor<T>, upstream: &Tensor<T>) -> Result<Tensor<T>> {
        require_same_shape(x, upstream)?;
        let cols = x.shape()[x.rank() - 1];
        let s = self.forward(x);
        let mut out = s.clone();
        for (chunk, (s_chunk, u_chunk)) in out
            .as_mut_slice()
            .chunks_mut(cols)
            .zip(s.as_slice().chunks(cols).zip(upstream.as_slice().chunks(cols)))
        {
            let mut dot = T::zero();
            for (&sv, &uv) in s_chunk.iter().zip(u_chunk.iter()) {
                dot = dot + sv * uv;
            }
            for ((g, &sv), &uv) in chunk.iter_mut().zip(s_chunk.iter()).zip(u_chunk.iter()) {
                *g = sv * (uv - dot);
            }
        }
        Ok(out)
    }
}

/// Swish: x · σ(x)
#[derive(Debug, Clone, Copy, Default)]
pub struct Swish;

impl<T: Element> Activation<T> for Swish {
    fn name(&self) -> &'static str {
        "swish"
    }

    fn forward(&self, x: &Tensor<T>) -> Tensor<T> {
        x.map(|v| v * sigmoid_scalar(v))
    }

    fn backward(&self, x: &Tensor<T>, upstream: &Tensor<T>) -> Result<Tensor<T>> {
        require_same_shape(x, upstream)?;
        Ok(zip_map(x, upstream, |v, u| {
            let s = sigmoid_scalar(v);
            let sw = v * s;
            (sw + s * (T::one() - sw)) * u
        }))
    }
}

/// GELU, tanh approximation:
/// `0.5x(1 + tanh(√(2/π)(x + 0.044715x³)))`
#[derive(Debug, Clone, Copy, Default)]
pub struct Gelu;

const GELU_COEFF: f64 = 0.044715;

impl<T: Element> Activation<T> for Gelu {
    fn name(&self) -> &'static str {
        "gelu"
    }

    fn forward(&self, x: &Tensor<T>) -> Tensor<T> {
        let c = T::from_f64((2.0 / std::f64::consts::PI).sqrt());
        let a = T::from_f64(GELU_COEFF);
        let half = T::from_f64(0.5);
        x.map(|v| {
            let inner = c * (v + a * v * v * v);
            half * v * (T::one() + inner.tanh())
        })
    }

    fn backward(&self, x: &Tensor<T>, upstream: &Tensor<T>) -> Result<Tensor<T>> {
        require_same_shape(x, upstream)?;
        let c = T::from_f64((2.0 / std::f64::consts::PI).sqrt());
        let a = T::from_f64(GELU_COEFF);
        let three = T::from_f64(3.0);
        let half = T::from_f64(0.5);
        Ok(zip_map(x, upstream, |v, u| {
            let inner = c * (v + a * v * v * v);
            let t = inner.tanh();
            // d/dx of the tanh approximation, by the product rule
            let d_inner = c * (T::one() + three * a * v * v);
            let d = half * (T::one() + t) + half * v * (T::one() - t * t) * d_inner;
            d * u
        }))
    }
}

/// Softplus: ln(1 + eˣ)
#[derive(Debug, Clone, Copy, Default)]
pub struct Softplus;

impl<T: Element> Activation<T> for Softplus {
    fn name(&self) -> &'static str {
        "softplus"
    }

    fn forward(&self, x: &Tensor<T>) -> Tensor<T> {
        x.map(|v| (T::one() + v.exp()).ln())
    }

    fn backward(&self, x: &Tensor<T>, upstream: &Tensor<T>) -> Result<Tensor<T>> {
        require_same_shape(x, upstream)?;
        Ok(zip_map(x, upstream, |v, u| sigmoid_scalar(v) * u))
    }
}

/// Identity activation
#[derive(Debug, Clone, Copy, Default)]
pub struct Linear;

impl<T: Element> Activation<T> for Linear {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn forward(&self, x: &Tensor<T>) -> Tensor<T> {
        x.clone()
    }

    fn backward(&self, x: &Tensor<T>, upstream: &Tensor<T>) -> Result<Tensor<T>> {
        require_same_shape(x, upstream)?;
        Ok(upstream.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vec1(data: Vec<f64>) -> Tensor<f64> {
        let n = data.len();
        Tensor::from_vec(&[n], data).unwrap()
    }

    /// Central finite difference of the forward pass at every element
    fn check_gradient<A: Activation<f64>>(act: &A, x: &Tensor<f64>) {
        let eps = 1e-6;
        let ones = Tensor::ones(x.shape()).unwrap();
        let grad = act.backward(x, &ones).unwrap();

        for i in 0..x.count() {
            let mut plus = x.clone();
            plus.as_mut_slice()[i] += eps;
            let mut minus = x.clone();
            minus.as_mut_slice()[i] -= eps;

            let numeric = (act.forward(&plus).sum() - act.forward(&minus).sum()) / (2.0 * eps);
            let analytic = grad.as_slice()[i];
            assert!(
                (numeric - analytic).abs() < 1e-4,
                "{}: grad mismatch at {i}: numeric {numeric}, analytic {analytic}",
                act.name()
            );
        }
    }

    #[test]
    fn test_relu_idempotent() {
        let x = vec1(vec![-2.0, -0.5, 0.0, 0.5, 2.0]);
        let once = Activation::<f64>::forward(&Relu, &x);
        let twice = Activation::<f64>::forward(&Relu, &once);
        assert_eq!(once, twice);
        assert_eq!(once.as_slice(), &[0.0, 0.0, 0.0, 0.5, 2.0]);
    }

    #[test]
    fn test_relu_backward_mask() {
        let x = vec1(vec![-1.0, 2.0]);
        let up = vec1(vec![10.0, 10.0]);
        let g = Relu.backward(&x, &up).unwrap();
        assert_eq!(g.as_slice(), &[0.0, 10.0]);
    }

    #[test]
    fn test_sigmoid_midpoint() {
        let x = vec1(vec![0.0]);
        let y = Activation::<f64>::forward(&Sigmoid, &x);
        assert!((y.as_slice()[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let x = vec1(vec![1.0, 2.0, 3.0, 4.0]);
        let y = Activation::<f64>::forward(&Softmax, &x);
        assert!((y.sum() - 1.0).abs() < 1e-6);

        // large logits stay finite thanks to the max shift
        let big = vec1(vec![1000.0, 1001.0]);
        let yb = Activation::<f64>::forward(&Softmax, &big);
        assert!(yb.as_slice().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_softmax_rows_independent() {
        let x = Tensor::<f64>::from_vec(&[2, 3], vec![1.0, 2.0, 3.0, 0.0, 0.0, 0.0]).unwrap();
        let y = Activation::<f64>::forward(&Softmax, &x);
        let row0: f64 = y.as_slice()[..3].iter().sum();
        let row1: f64 = y.as_slice()[3..].iter().sum();
        assert!((row0 - 1.0).abs() < 1e-9);
        assert!((row1 - 1.0).abs() < 1e-9);
        assert!((y.as_slice()[3] - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_softmax_batched_backward_matches_single_rows() {
        let a = vec1(vec![0.5, -1.0, 2.0]);
        let b = vec1(vec![1.0, 1.5, -0.5]);
        let ua = vec1(vec![1.0, 0.0, 0.0]);
        let ub = vec1(vec![0.0, 1.0, 0.0]);

        let batch = Tensor::<f64>::from_rows(&[a.as_slice().to_vec(), b.as_slice().to_vec()]).unwrap();
        let up = Tensor::<f64>::from_rows(&[ua.as_slice().to_vec(), ub.as_slice().to_vec()]).unwrap();

        let g_batch = Softmax.backward(&batch, &up).unwrap();
        let g_a = Softmax.backward(&a, &ua).unwrap();
        let g_b = Softmax.backward(&b, &ub).unwrap();

        for i in 0..3 {
            assert!((g_batch.as_slice()[i] - g_a.as_slice()[i]).abs() < 1e-12);
            assert!((g_batch.as_slice()[3 + i] - g_b.as_slice()[i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_gradients_match_finite_differences() {
        let x = vec1(vec![-1.5, -0.3, 0.2, 0.9, 2.1]);
        check_gradient(&LeakyRelu::default(), &x);
        check_gradient(&Elu::default(), &x);
        check_gradient(&Selu, &x);
        check_gradient(&Sigmoid, &x);
        check_gradient(&TanhAct, &x);
        check_gradient(&Swish, &x);
        check_gradient(&Gelu, &x);
        check_gradient(&Softplus, &x);
    }

    #[test]
    fn test_backward_shape_mismatch() {
        let x = vec1(vec![1.0, 2.0]);
        let up = vec1(vec![1.0, 2.0, 3.0]);
        assert!(Sigmoid.backward(&x, &up).is_err());
    }

    #[test]
    fn test_linear_copies() {
        let x = vec1(vec![1.0, -2.0]);
        let up = vec1(vec![0.5, 0.5]);
        assert_eq!(Activation::<f64>::forward(&Linear, &x), x);
        assert_eq!(Linear.backward(&x, &up).unwrap(), up);
    }
}
