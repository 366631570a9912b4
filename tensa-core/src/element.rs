//! # Numeric Element Trait
//!
//! Single generic seam between [`Tensor`](crate::tensor::Tensor) and the
//! per-type vectorized kernels in [`simd`](crate::simd). Both `f32` and
//! `f64` instantiate the full trait, so every tensor operation is
//! available at both precisions and routes to the kernel written for its
//! element type.

use std::fmt::{Debug, Display};

use num_traits::Float;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::simd;

/// Numeric element type usable inside a [`Tensor`](crate::tensor::Tensor).
///
/// `Float` (num-traits) supplies the scalar math (`exp`, `ln`, `sqrt`,
/// `powf`, `tanh`, ...); the `vec_*` hooks dispatch to the vectorized
/// backend for the concrete type.
pub trait Element:
    Float + Default + Debug + Display + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Short type name, used in error messages and formatting
    const NAME: &'static str;

    /// Lossy conversion from `f64` (exact for `f64`, rounded for `f32`)
    fn from_f64(v: f64) -> Self;

    /// Widening conversion to `f64`
    fn to_f64(self) -> f64;

    /// Elementwise `out[i] = a[i] + b[i]`
    fn vec_add(a: &[Self], b: &[Self], out: &mut [Self]);

    /// Elementwise `out[i] = a[i] - b[i]`
    fn vec_sub(a: &[Self], b: &[Self], out: &mut [Self]);

    /// Elementwise `out[i] = a[i] * b[i]`
    fn vec_mul(a: &[Self], b: &[Self], out: &mut [Self]);

    /// Elementwise `out[i] = a[i] * k`
    fn vec_scale(a: &[Self], k: Self, out: &mut [Self]);

    /// `y[i] += a * x[i]` (the GEMM inner kernel)
    fn vec_axpy(a: Self, x: &[Self], y: &mut [Self]);

    /// Dot product `Σ a[i] * b[i]`
    fn vec_dot(a: &[Self], b: &[Self]) -> Self;

    /// Horizontal sum `Σ a[i]`
    fn vec_sum(a: &[Self]) -> Self;
}

impl Element for f32 {
    const NAME: &'static str = "f32";

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn vec_add(a: &[Self], b: &[Self], out: &mut [Self]) {
        simd::add_f32(a, b, out)
    }

    #[inline]
    fn vec_sub(a: &[Self], b: &[Self], out: &mut [Self]) {
        simd::sub_f32(a, b, out)
    }

    #[inline]
    fn vec_mul(a: &[Self], b: &[Self], out: &mut [Self]) {
        simd::mul_f32(a, b, out)
    }

    #[inline]
    fn vec_scale(a: &[Self], k: Self, out: &mut [Self]) {
        simd::scale_f32(a, k, out)
    }

    #[inline]
    fn vec_axpy(a: Self, x: &[Self], y: &mut [Self]) {
        simd::axpy_f32(a, x, y)
    }

    #[inline]
    fn vec_dot(a: &[Self], b: &[Self]) -> Self {
        simd::dot_f32(a, b)
    }

    #[inline]
    fn vec_sum(a: &[Self]) -> Self {
        simd::sum_f32(a)
    }
}

impl Element for f64 {
    const NAME: &'static str = "f64";

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn vec_add(a: &[Self], b: &[Self], out: &mut [Self]) {
        simd::add_f64(a, b, out)
    }

    #[inline]
    fn vec_sub(a: &[Self], b: &[Self], out: &mut [Self]) {
        simd::sub_f64(a, b, out)
    }

    #[inline]
    fn vec_mul(a: &[Self], b: &[Self], out: &mut [Self]) {
        simd::mul_f64(a, b, out)
    }

    #[inline]
    fn vec_scale(a: &[Self], k: Self, out: &mut [Self]) {
        simd::scale_f64(a, k, out)
    }

    #[inline]
    fn vec_axpy(a: Self, x: &[Self], y: &mut [Self]) {
        simd::axpy_f64(a, x, y)
    }

    #[inline]
    fn vec_dot(a: &[Self], b: &[Self]) -> Self {
        simd::dot_f64(a, b)
    }

    #[inline]
    fn vec_sum(a: &[Self]) -> Self {
        simd::sum_f64(a)
    }
}
