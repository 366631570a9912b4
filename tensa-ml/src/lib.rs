//! # Tensa ML
//!
//! Training primitives on top of [`tensa_core`]: activation functions,
//! loss functions, gradient-descent optimizers, learning-rate
//! schedulers and dataset preprocessing.
//!
//! ## Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | `activations` | `Relu`, `Sigmoid`, `Softmax`, `Gelu`, ... behind the `Activation` trait |
//! | `loss` | `Mse`, `Bce`, `CrossEntropy`, ... behind the `Loss` trait |
//! | `optim` | `Sgd`, `Adam`, `AdamW`, `Rmsprop`, `Adagrad` and gradient clipping |
//! | `schedulers` | epoch-indexed learning-rate policies |
//! | `preprocess` | scalers, encoders, imputation and dataset splitting |
//! | `error` | `TensaMlError` and the crate `Result` alias |
//!
//! ## Example
//!
//! ```
//! use tensa_core::Tensor;
//! use tensa_ml::activations::{Activation, Relu};
//! use tensa_ml::loss::{Loss, Mse};
//! use tensa_ml::optim::{Optimizer, Sgd};
//!
//! let mut params = vec![Tensor::<f64>::from_vec(&[2], vec![0.5, -0.5]).unwrap()];
//! let target = Tensor::from_vec(&[2], vec![1.0, 1.0]).unwrap();
//!
//! let mut opt = Sgd::new(0.1);
//! for _ in 0..100 {
//!     let pred = Relu.forward(&params[0]);
//!     let grad = Mse.backward(&pred, &target).unwrap();
//!     let grads = vec![Relu.backward(&params[0], &grad).unwrap()];
//!     opt.step(&mut params, &grads).unwrap();
//! }
//! ```

pub mod activations;
pub mod error;
pub mod loss;
pub mod optim;
pub mod preprocess;
pub mod schedulers;

pub use error::{Result, TensaMlError};

/// Common imports for training code
pub mod prelude {
    pub use crate::activations::Activation;
    pub use crate::error::{Result, TensaMlError};
    pub use crate::loss::Loss;
    pub use crate::optim::Optimizer;
    pub use crate::schedulers::LrScheduler;
    pub use tensa_core::{Element, Tensor};
}
