//! # Reductions and Elementwise Maps
//!
//! Whole-tensor reductions (sum, mean, variance, extrema, arg-extrema)
//! and non-mutating elementwise transcendental maps. Variance is the
//! population variance, matching the reduction used by `normalize`.

use crate::element::Element;
use crate::tensor::Tensor;

impl<T: Element> Tensor<T> {
    /// Sum of all elements
    pub fn sum(&self) -> T {
        T::vec_sum(self.as_slice())
    }

    /// Mean of all elements
    pub fn mean(&self) -> T {
        self.sum() / T::from_f64(self.count() as f64)
    }

    /// Population variance: `(1/n) Σ (xi - μ)²`
    pub fn variance(&self) -> T {
        let mean = self.mean();
        let mut sum_sq = T::zero();
        for &v in self.as_slice() {
            let diff = v - mean;
            sum_sq = sum_sq + diff * diff;
        }
        sum_sq / T::from_f64(self.count() as f64)
    }

    /// Standard deviation: `√variance`
    pub fn std_dev(&self) -> T {
        self.variance().sqrt()
    }

    /// Largest element
    pub fn max_value(&self) -> T {
        self.as_slice().iter().fold(T::neg_infinity(), |m, &v| m.max(v))
    }

    /// Smallest element
    pub fn min_value(&self) -> T {
        self.as_slice().iter().fold(T::infinity(), |m, &v| m.min(v))
    }

    /// Flat index of the largest element (first occurrence)
    pub fn argmax(&self) -> usize {
        let mut best = T::neg_infinity();
        let mut idx = 0;
        for (i, &v) in self.as_slice().iter().enumerate() {
            if v > best {
                best = v;
                idx = i;
            }
        }
        idx
    }

    /// Flat index of the smallest element (first occurrence)
    pub fn argmin(&self) -> usize {
        let mut best = T::infinity();
        let mut idx = 0;
        for (i, &v) in self.as_slice().iter().enumerate() {
            if v < best {
                best = v;
                idx = i;
            }
        }
        idx
    }

    /// Apply `f` to every element, returning a new tensor
    pub fn map<F: Fn(T) -> T>(&self, f: F) -> Self {
        let mut out = self.clone();
        for v in out.as_mut_slice() {
            *v = f(*v);
        }
        out
    }

    /// Elementwise `e^x`
    pub fn exp(&self) -> Self {
        self.map(|v| v.exp())
    }

    /// Elementwise natural logarithm
    pub fn ln(&self) -> Self {
        self.map(|v| v.ln())
    }

    /// Elementwise square root
    pub fn sqrt(&self) -> Self {
        self.map(|v| v.sqrt())
    }

    /// Elementwise power
    pub fn powf(&self, exponent: T) -> Self {
        self.map(|v| v.powf(exponent))
    }

    /// Clamp every element to `[min, max]`
    pub fn clip(&self, min: T, max: T) -> Self {
        self.map(|v| v.max(min).min(max))
    }

    /// Z-score normalization: `(x - mean) / std`
    ///
    /// Returns an unmodified copy when the standard deviation is
    /// (numerically) zero, to avoid division by zero.
    pub fn normalize(&self) -> Self {
        let std = self.std_dev();
        if std < T::from_f64(1e-10) {
            return self.clone();
        }
        let mean = self.mean();
        self.map(|v| (v - mean) / std)
    }
}
