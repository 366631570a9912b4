//! # Strided Tensor
//!
//! Row-major multi-dimensional numeric array. The flat `data` buffer is
//! ordered so the last dimension varies fastest; `strides` are derived
//! from the shape at construction and every indexed access resolves
//! through them.
//!
//! Tensors have value semantics: `Clone` is the explicit duplicate, and
//! no two tensors ever alias one buffer. Arithmetic lives in
//! [`ops`](crate::ops), reductions and elementwise maps in
//! [`stats`](crate::stats).

use std::f64::consts::PI;

use rand::Rng;
use rand::distributions::Standard;
use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::error::{Result, TensorError, shape_string};

/// Strided, shape-typed, row-major numeric array.
///
/// Invariants: `data.len() == product(shape)` and every dimension > 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "T: Element")]
pub struct Tensor<T: Element = f32> {
    shape: Vec<usize>,
    strides: Vec<usize>,
    data: Vec<T>,
}

/// Row-major strides: last dimension varies fastest
fn compute_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; shape.len()];
    for i in (0..shape.len().saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}

fn validate_shape(shape: &[usize]) -> Result<()> {
    if shape.is_empty() {
        return Err(TensorError::InvalidShape("shape must not be empty".into()));
    }
    if shape.iter().any(|&d| d == 0) {
        return Err(TensorError::InvalidShape(format!(
            "every dimension must be positive, got {}",
            shape_string(shape)
        )));
    }
    Ok(())
}

impl<T: Element> Tensor<T> {
    /// Create a tensor of `shape` with every element set to `fill`
    pub fn new(shape: &[usize], fill: T) -> Result<Self> {
        validate_shape(shape)?;
        let count = shape.iter().product();
        Ok(Self {
            shape: shape.to_vec(),
            strides: compute_strides(shape),
            data: vec![fill; count],
        })
    }

    /// Create a tensor from a flat row-major buffer
    ///
    /// `data.len()` must equal the product of `shape`.
    pub fn from_vec(shape: &[usize], data: Vec<T>) -> Result<Self> {
        validate_shape(shape)?;
        let count: usize = shape.iter().product();
        if data.len() != count {
            return Err(TensorError::ShapeMismatch {
                expected: format!("{} elements for shape {}", count, shape_string(shape)),
                actual: format!("{} elements", data.len()),
            });
        }
        Ok(Self {
            shape: shape.to_vec(),
            strides: compute_strides(shape),
            data,
        })
    }

    /// Create a rank-2 tensor from rows (all rows must have equal length)
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self> {
        if rows.is_empty() {
            return Err(TensorError::InvalidShape("no rows given".into()));
        }
        let cols = rows[0].len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(TensorError::ShapeMismatch {
                    expected: format!("{cols} columns"),
                    actual: format!("{} columns in row {i}", row.len()),
                });
            }
        }
        let data: Vec<T> = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Self::from_vec(&[rows.len(), cols], data)
    }

    /// Tensor of zeros
    pub fn zeros(shape: &[usize]) -> Result<Self> {
        Self::new(shape, T::zero())
    }

    /// Tensor of ones
    pub fn ones(shape: &[usize]) -> Result<Self> {
        Self::new(shape, T::one())
    }

    /// Identity matrix of size n×n
    pub fn eye(n: usize) -> Result<Self> {
        let mut t = Self::zeros(&[n, n])?;
        for i in 0..n {
            t.data[i * n + i] = T::one();
        }
        Ok(t)
    }

    /// Uniform random tensor in `[min, max)`
    ///
    /// The generator is explicit so callers can seed it for
    /// reproducibility (`StdRng::seed_from_u64`).
    pub fn random<R: Rng + ?Sized>(shape: &[usize], min: T, max: T, rng: &mut R) -> Result<Self> {
        let mut t = Self::zeros(shape)?;
        let span = max - min;
        for v in t.data.iter_mut() {
            *v = min + span * T::from_f64(rng.sample::<f64, _>(Standard));
        }
        Ok(t)
    }

    /// Gaussian random tensor via pairwise Box–Muller
    ///
    /// Samples are generated two at a time; an odd element count draws
    /// one final pair and keeps only the first variate.
    pub fn randn<R: Rng + ?Sized>(shape: &[usize], mean: T, std: T, rng: &mut R) -> Result<Self> {
        let mut t = Self::zeros(shape)?;
        let n = t.data.len();
        let mut i = 0;
        while i < n {
            // u1 in (0, 1] so ln(u1) is finite
            let u1 = 1.0 - rng.sample::<f64, _>(Standard);
            let u2 = rng.sample::<f64, _>(Standard);
            let r = (-2.0 * u1.ln()).sqrt();
            let z0 = r * (2.0 * PI * u2).cos();
            let z1 = r * (2.0 * PI * u2).sin();

            t.data[i] = mean + std * T::from_f64(z0);
            if i + 1 < n {
                t.data[i + 1] = mean + std * T::from_f64(z1);
            }
            i += 2;
        }
        Ok(t)
    }

    /// Shape of the tensor
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Row-major strides
    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Number of dimensions
    #[inline]
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements
    #[inline]
    pub fn count(&self) -> usize {
        self.data.len()
    }

    /// Flat row-major view of the buffer
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable flat row-major view of the buffer
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the tensor, returning its flat buffer
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Resolve a full multi-dimensional index to a flat offset
    fn offset(&self, index: &[usize]) -> Result<usize> {
        if index.len() != self.rank() {
            return Err(TensorError::IndexArity {
                rank: self.rank(),
                arity: index.len(),
            });
        }
        let mut off = 0;
        for (dim, (&i, (&size, &stride))) in index
            .iter()
            .zip(self.shape.iter().zip(self.strides.iter()))
            .enumerate()
        {
            if i >= size {
                return Err(TensorError::IndexOutOfRange {
                    index: i,
                    dim,
                    size,
                });
            }
            off += i * stride;
        }
        Ok(off)
    }

    /// Element at a full multi-dimensional index
    pub fn get(&self, index: &[usize]) -> Result<T> {
        Ok(self.data[self.offset(index)?])
    }

    /// Assign the element at a full multi-dimensional index
    pub fn set(&mut self, index: &[usize], value: T) -> Result<()> {
        let off = self.offset(index)?;
        self.data[off] = value;
        Ok(())
    }

    /// Copy of row `i` of a rank-2 tensor, as a rank-1 tensor
    pub fn row(&self, i: usize) -> Result<Self> {
        self.require_rank(2)?;
        let (rows, cols) = (self.shape[0], self.shape[1]);
        if i >= rows {
            return Err(TensorError::IndexOutOfRange {
                index: i,
                dim: 0,
                size: rows,
            });
        }
        Self::from_vec(&[cols], self.data[i * cols..(i + 1) * cols].to_vec())
    }

    /// Copy of column `j` of a rank-2 tensor, as a rank-1 tensor
    pub fn col(&self, j: usize) -> Result<Self> {
        self.require_rank(2)?;
        let (rows, cols) = (self.shape[0], self.shape[1]);
        if j >= cols {
            return Err(TensorError::IndexOutOfRange {
                index: j,
                dim: 1,
                size: cols,
            });
        }
        let data: Vec<T> = (0..rows).map(|i| self.data[i * cols + j]).collect();
        Self::from_vec(&[rows], data)
    }

    /// Reshape, preserving element order
    ///
    /// At most one dimension may be `-1`; it is inferred from the total
    /// element count. All other dimensions must be positive and their
    /// product must divide the count evenly.
    pub fn reshape(&self, dims: &[i64]) -> Result<Self> {
        let wildcards = dims.iter().filter(|&&d| d == -1).count();
        if wildcards > 1 {
            return Err(TensorError::InvalidShape(
                "at most one dimension may be -1".into(),
            ));
        }
        if dims.iter().any(|&d| d == 0 || d < -1) {
            return Err(TensorError::InvalidShape(format!(
                "dimensions must be positive or -1, got {dims:?}"
            )));
        }

        let known: usize = dims.iter().filter(|&&d| d > 0).map(|&d| d as usize).product();
        let mut shape = Vec::with_capacity(dims.len());
        for &d in dims {
            if d == -1 {
                if self.count() % known != 0 {
                    return Err(TensorError::InvalidShape(format!(
                        "cannot infer wildcard: {} elements not divisible by {known}",
                        self.count()
                    )));
                }
                shape.push(self.count() / known);
            } else {
                shape.push(d as usize);
            }
        }

        let product: usize = shape.iter().product();
        if product != self.count() {
            return Err(TensorError::ShapeMismatch {
                expected: format!("{} elements", self.count()),
                actual: format!("shape {} with {product} elements", shape_string(&shape)),
            });
        }
        Self::from_vec(&shape, self.data.clone())
    }

    /// Collapse to rank 1, preserving element order
    pub fn flatten(&self) -> Self {
        Self {
            shape: vec![self.count()],
            strides: vec![1],
            data: self.data.clone(),
        }
    }

    /// Transpose of a rank-2 tensor (explicit index remap)
    pub fn transpose(&self) -> Result<Self> {
        self.require_rank(2)?;
        let (rows, cols) = (self.shape[0], self.shape[1]);
        let mut data = vec![T::zero(); self.count()];
        for i in 0..rows {
            for j in 0..cols {
                data[j * rows + i] = self.data[i * cols + j];
            }
        }
        Self::from_vec(&[cols, rows], data)
    }

    pub(crate) fn require_rank(&self, expected: usize) -> Result<()> {
        if self.rank() != expected {
            return Err(TensorError::RankMismatch {
                expected,
                actual: self.rank(),
            });
        }
        Ok(())
    }

    pub(crate) fn require_same_shape(&self, other: &Self) -> Result<()> {
        if self.shape != other.shape {
            return Err(TensorError::ShapeMismatch {
                expected: shape_string(&self.shape),
                actual: shape_string(&other.shape),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_count_matches_shape_product() {
        let t = Tensor::<f64>::from_vec(&[2, 3, 4], (0..24).map(|i| i as f64).collect()).unwrap();
        assert_eq!(t.count(), 24);
        assert_eq!(t.rank(), 3);
        assert_eq!(t.strides(), &[12, 4, 1]);
    }

    #[test]
    fn test_from_vec_rejects_bad_length() {
        let err = Tensor::<f32>::from_vec(&[2, 3], vec![1.0; 5]);
        assert!(err.is_err());
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(Tensor::<f32>::zeros(&[3, 0]).is_err());
    }

    #[test]
    fn test_strided_indexing() {
        let t = Tensor::<f32>::from_vec(&[2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(t.get(&[0, 0]).unwrap(), 1.0);
        assert_eq!(t.get(&[1, 2]).unwrap(), 6.0);
        assert!(t.get(&[0]).is_err()); // wrong arity
        assert!(t.get(&[0, 3]).is_err()); // out of range
    }

    #[test]
    fn test_set() {
        let mut t = Tensor::<f64>::zeros(&[2, 2]).unwrap();
        t.set(&[1, 0], 7.0).unwrap();
        assert_eq!(t.get(&[1, 0]).unwrap(), 7.0);
    }

    #[test]
    fn test_eye() {
        let t = Tensor::<f64>::eye(3).unwrap();
        assert_eq!(t.get(&[0, 0]).unwrap(), 1.0);
        assert_eq!(t.get(&[0, 1]).unwrap(), 0.0);
        assert_eq!(t.get(&[2, 2]).unwrap(), 1.0);
    }

    #[test]
    fn test_row_col_are_copies() {
        let t = Tensor::<f32>::from_vec(&[2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let r = t.row(1).unwrap();
        assert_eq!(r.as_slice(), &[4.0, 5.0, 6.0]);
        let c = t.col(2).unwrap();
        assert_eq!(c.as_slice(), &[3.0, 6.0]);
    }

    #[test]
    fn test_reshape_wildcard() {
        let t = Tensor::<f32>::from_vec(&[2, 6], (0..12).map(|i| i as f32).collect()).unwrap();
        let r = t.reshape(&[3, -1]).unwrap();
        assert_eq!(r.shape(), &[3, 4]);
        assert_eq!(r.as_slice(), t.as_slice()); // order preserved

        // a lone wildcard absorbs everything
        assert_eq!(t.reshape(&[-1]).unwrap().shape(), &[12]);

        assert!(t.reshape(&[-1, -1]).is_err());
        assert!(t.reshape(&[5, -1]).is_err());
    }

    #[test]
    fn test_flatten() {
        let t = Tensor::<f64>::ones(&[2, 2, 2]).unwrap();
        let f = t.flatten();
        assert_eq!(f.shape(), &[8]);
    }

    #[test]
    fn test_transpose_twice_is_identity() {
        let t = Tensor::<f64>::from_vec(&[2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let tt = t.transpose().unwrap();
        assert_eq!(tt.shape(), &[3, 2]);
        assert_eq!(tt.get(&[2, 1]).unwrap(), 6.0);
        let back = tt.transpose().unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn test_random_bounds_and_determinism() {
        let mut rng = StdRng::seed_from_u64(42);
        let a = Tensor::<f64>::random(&[100], -1.0, 1.0, &mut rng).unwrap();
        assert!(a.as_slice().iter().all(|&v| (-1.0..1.0).contains(&v)));

        let mut rng2 = StdRng::seed_from_u64(42);
        let b = Tensor::<f64>::random(&[100], -1.0, 1.0, &mut rng2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_factories_at_both_precisions() {
        let mut rng = StdRng::seed_from_u64(11);
        let a = Tensor::<f32>::random(&[16], 0.0, 1.0, &mut rng).unwrap();
        assert!(a.as_slice().iter().all(|&v| (0.0..1.0).contains(&v)));

        let g = Tensor::<f32>::randn(&[16], 2.0, 0.0, &mut rng).unwrap();
        assert!(g.as_slice().iter().all(|&v| v == 2.0)); // zero std collapses to the mean
    }

    #[test]
    fn test_randn_moments() {
        let mut rng = StdRng::seed_from_u64(7);
        let t = Tensor::<f64>::randn(&[10001], 0.0, 1.0, &mut rng).unwrap(); // odd count
        let mean: f64 = t.as_slice().iter().sum::<f64>() / t.count() as f64;
        assert!(mean.abs() < 0.05, "sample mean was {mean}");
    }

    #[test]
    fn test_clone_is_independent() {
        let t = Tensor::<f32>::ones(&[4]).unwrap();
        let mut c = t.clone();
        c.set(&[0], 9.0).unwrap();
        assert_eq!(t.get(&[0]).unwrap(), 1.0);
    }

    #[test]
    fn test_serde_roundtrip() {
        let t = Tensor::<f64>::from_vec(&[2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let json = serde_json::to_string(&t).unwrap();
        let back: Tensor<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(t, back);
    }
}
