//! # Tensor Arithmetic
//!
//! Elementwise arithmetic, scalar scaling and matrix multiply, all
//! non-mutating and routed through the vectorized kernels. The checked
//! methods return `Result`; the operator impls on references are sugar
//! over them and panic on a contract violation, since `std::ops` cannot
//! return `Result`.

use std::ops::{Add, Mul, Neg, Sub};

use crate::element::Element;
use crate::error::{Result, TensorError, shape_string};
use crate::tensor::Tensor;

impl<T: Element> Tensor<T> {
    /// Elementwise sum; shapes must be identical
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.require_same_shape(other)?;
        let mut out = self.clone();
        T::vec_add(self.as_slice(), other.as_slice(), out.as_mut_slice());
        Ok(out)
    }

    /// Elementwise difference; shapes must be identical
    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.require_same_shape(other)?;
        let mut out = self.clone();
        T::vec_sub(self.as_slice(), other.as_slice(), out.as_mut_slice());
        Ok(out)
    }

    /// Elementwise (Hadamard) product; shapes must be identical
    pub fn mul(&self, other: &Self) -> Result<Self> {
        self.require_same_shape(other)?;
        let mut out = self.clone();
        T::vec_mul(self.as_slice(), other.as_slice(), out.as_mut_slice());
        Ok(out)
    }

    /// Multiply every element by `k`
    pub fn scale(&self, k: T) -> Self {
        let mut out = self.clone();
        T::vec_scale(self.as_slice(), k, out.as_mut_slice());
        out
    }

    /// Matrix multiply: `M×K` by `K×N` → `M×N`
    ///
    /// Both operands must be rank 2 with a compatible inner dimension.
    /// Row-major general matrix multiply with an axpy inner kernel.
    pub fn matmul(&self, other: &Self) -> Result<Self> {
        self.require_rank(2)?;
        other.require_rank(2)?;
        let (m, k) = (self.shape()[0], self.shape()[1]);
        let (k2, n) = (other.shape()[0], other.shape()[1]);
        if k != k2 {
            return Err(TensorError::IncompatibleDimensions(format!(
                "matmul of {} by {}: inner dimensions {k} and {k2} differ",
                shape_string(self.shape()),
                shape_string(other.shape())
            )));
        }

        let a = self.as_slice();
        let b = other.as_slice();
        let mut out = Tensor::zeros(&[m, n])?;
        let o = out.as_mut_slice();
        for i in 0..m {
            let row_out = &mut o[i * n..(i + 1) * n];
            for p in 0..k {
                T::vec_axpy(a[i * k + p], &b[p * n..(p + 1) * n], row_out);
            }
        }
        Ok(out)
    }

    /// Dot product of two rank-1 tensors of equal length
    pub fn dot(&self, other: &Self) -> Result<T> {
        self.require_rank(1)?;
        other.require_rank(1)?;
        if self.count() != other.count() {
            return Err(TensorError::IncompatibleDimensions(format!(
                "dot of vectors with lengths {} and {}",
                self.count(),
                other.count()
            )));
        }
        Ok(T::vec_dot(self.as_slice(), other.as_slice()))
    }
}

impl<T: Element> Add for &Tensor<T> {
    type Output = Tensor<T>;

    fn add(self, rhs: Self) -> Tensor<T> {
        match Tensor::add(self, rhs) {
            Ok(t) => t,
            Err(e) => panic!("tensor addition: {e}"),
        }
    }
}

impl<T: Element> Sub for &Tensor<T> {
    type Output = Tensor<T>;

    fn sub(self, rhs: Self) -> Tensor<T> {
        match Tensor::sub(self, rhs) {
            Ok(t) => t,
            Err(e) => panic!("tensor subtraction: {e}"),
        }
    }
}

/// Elementwise product
impl<T: Element> Mul for &Tensor<T> {
    type Output = Tensor<T>;

    fn mul(self, rhs: Self) -> Tensor<T> {
        match Tensor::mul(self, rhs) {
            Ok(t) => t,
            Err(e) => panic!("tensor multiplication: {e}"),
        }
    }
}

/// Scalar product
impl<T: Element> Mul<T> for &Tensor<T> {
    type Output = Tensor<T>;

    fn mul(self, rhs: T) -> Tensor<T> {
        self.scale(rhs)
    }
}

impl<T: Element> Neg for &Tensor<T> {
    type Output = Tensor<T>;

    fn neg(self) -> Tensor<T> {
        self.scale(-T::one())
    }
}
