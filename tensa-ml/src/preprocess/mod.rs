//! # Preprocessing
//!
//! Dataset transforms operating on plain `f64` rows, independent of the
//! tensor type. Stateful transforms follow a fit/transform protocol:
//! `fit` learns statistics from training data, `transform` applies
//! them, and calling `transform` before `fit` is a `NotFitted` error.
//!
//! ## Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | `scalers` | `StandardScaler`, `MinMaxScaler`, `Normalizer`, `SimpleImputer` |
//! | `encoders` | `LabelEncoder`, `OneHotEncoder` |
//! | `split` | `train_test_split`, `KFold` |

pub mod encoders;
pub mod scalers;
pub mod split;

pub use encoders::{LabelEncoder, OneHotEncoder};
pub use scalers::{ImputeStrategy, MinMaxScaler, Norm, Normalizer, SimpleImputer, StandardScaler};
pub use split::{train_test_split, KFold};
