//! # tensa-core — Strided Tensors
//!
//! Small, self-contained numerical core: a strided row-major tensor type
//! generic over its numeric element, with vectorized arithmetic,
//! reductions and matrix multiply.
//!
//! ## Features
//!
//! - **tensor**: construction, factories, strided indexing, shape ops
//! - **ops**: elementwise arithmetic, scalar scaling, matmul, dot
//! - **stats**: reductions, argmax/argmin, transcendental maps, z-score
//! - **element**: one numeric trait, instantiated by `f32` and `f64`
//!   with full operator parity
//! - **simd**: AVX2/NEON kernels behind the `simd` cargo feature,
//!   scalar fallback otherwise
//!
//! Tensors have value semantics — `clone()` is the explicit duplicate
//! and no two tensors share a buffer. The crate is synchronous and
//! single-threaded; callers own their tensors and serialize access.

pub mod error;
pub use error::{Result, TensorError};

pub mod element;
pub use element::Element;

pub mod simd;

pub mod tensor;
pub use tensor::Tensor;

pub mod ops;
pub mod stats;

/// Prelude module with common re-exports
pub mod prelude {
    pub use crate::element::Element;
    pub use crate::error::{Result, TensorError};
    pub use crate::tensor::Tensor;
}
