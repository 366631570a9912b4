//! Dataset splitting.
//!
//! Both splitters take an explicit seed, so a given seed always
//! produces the same partition.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TensaMlError};

/// Splits paired feature and target slices into train and test sets
///
/// `test_size` is the held-out fraction in `(0, 1)`; the split point is
/// `round(n · (1 − test_size))`. With `shuffle` the indices are
/// permuted with a `seed`-derived generator first, otherwise input
/// order is preserved.
pub fn train_test_split<X: Clone, Y: Clone>(
    x: &[X],
    y: &[Y],
    test_size: f64,
    shuffle: bool,
    seed: u64,
) -> Result<(Vec<X>, Vec<X>, Vec<Y>, Vec<Y>)> {
    if x.len() != y.len() {
        return Err(TensaMlError::LengthMismatch(format!(
            "features have {} samples but targets have {}",
            x.len(),
            y.len()
        )));
    }
    if x.is_empty() {
        return Err(TensaMlError::InvalidArgument(
            "cannot split empty data".into(),
        ));
    }
    if !(0.0..1.0).contains(&test_size) || test_size == 0.0 {
        return Err(TensaMlError::InvalidArgument(format!(
            "test_size must be in (0, 1), got {test_size}"
        )));
    }

    let n = x.len();
    let mut indices: Vec<usize> = (0..n).collect();
    if shuffle {
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);
    }

    let split = ((n as f64) * (1.0 - test_size)).round() as usize;
    let (train_idx, test_idx) = indices.split_at(split);

    let take = |idx: &[usize]| -> (Vec<X>, Vec<Y>) {
        (
            idx.iter().map(|&i| x[i].clone()).collect(),
            idx.iter().map(|&i| y[i].clone()).collect(),
        )
    };
    let (x_train, y_train) = take(train_idx);
    let (x_test, y_test) = take(test_idx);
    Ok((x_train, x_test, y_train, y_test))
}

/// K-fold cross-validation index generator
///
/// `split` yields `(train_indices, test_indices)` pairs, one per fold.
/// When `n_samples` does not divide evenly, the first
/// `n_samples % n_splits` folds receive one extra sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KFold {
    n_splits: usize,
    shuffle: bool,
    seed: u64,
}

impl KFold {
    pub fn new(n_splits: usize) -> Self {
        Self {
            n_splits,
            shuffle: false,
            seed: 0,
        }
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn n_splits(&self) -> usize {
        self.n_splits
    }

    pub fn split(&self, n_samples: usize) -> Result<Vec<(Vec<usize>, Vec<usize>)>> {
        if self.n_splits < 2 {
            return Err(TensaMlError::InvalidArgument(format!(
                "n_splits must be at least 2, got {}",
                self.n_splits
            )));
        }
        if n_samples < self.n_splits {
            return Err(TensaMlError::InvalidArgument(format!(
                "cannot split {n_samples} samples into {} folds",
                self.n_splits
            )));
        }

        let mut indices: Vec<usize> = (0..n_samples).collect();
        if self.shuffle {
            let mut rng = StdRng::seed_from_u64(self.seed);
            indices.shuffle(&mut rng);
        }

        let base = n_samples / self.n_splits;
        let extra = n_samples % self.n_splits;

        let mut folds = Vec::with_capacity(self.n_splits);
        let mut start = 0;
        for fold in 0..self.n_splits {
            let size = base + usize::from(fold < extra);
            let test: Vec<usize> = indices[start..start + size].to_vec();
            let train: Vec<usize> = indices[..start]
                .iter()
                .chain(&indices[start + size..])
                .copied()
                .collect();
            folds.push((train, test));
            start += size;
        }
        Ok(folds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sizes_80_20() {
        let x: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let y: Vec<f64> = x.clone();
        let (xtr, xte, ytr, yte) = train_test_split(&x, &y, 0.2, false, 0).unwrap();
        assert_eq!(xtr.len(), 80);
        assert_eq!(xte.len(), 20);
        assert_eq!(ytr.len(), 80);
        assert_eq!(yte.len(), 20);
    }

    #[test]
    fn test_split_without_shuffle_preserves_order() {
        let x = vec![1, 2, 3, 4, 5];
        let y = vec![10, 20, 30, 40, 50];
        let (xtr, xte, ytr, yte) = train_test_split(&x, &y, 0.4, false, 0).unwrap();
        assert_eq!(xtr, vec![1, 2, 3]);
        assert_eq!(xte, vec![4, 5]);
        assert_eq!(ytr, vec![10, 20, 30]);
        assert_eq!(yte, vec![40, 50]);
    }

    #[test]
    fn test_split_shuffle_keeps_pairs_aligned() {
        let x: Vec<usize> = (0..50).collect();
        let y: Vec<usize> = (0..50).map(|i| i * 10).collect();
        let (xtr, xte, ytr, yte) = train_test_split(&x, &y, 0.3, true, 42).unwrap();
        for (a, b) in xtr.iter().zip(&ytr) {
            assert_eq!(*b, a * 10);
        }
        for (a, b) in xte.iter().zip(&yte) {
            assert_eq!(*b, a * 10);
        }
    }

    #[test]
    fn test_split_same_seed_same_partition() {
        let x: Vec<usize> = (0..30).collect();
        let y = x.clone();
        let a = train_test_split(&x, &y, 0.25, true, 7).unwrap();
        let b = train_test_split(&x, &y, 0.25, true, 7).unwrap();
        assert_eq!(a.0, b.0);
        assert_eq!(a.1, b.1);
    }

    #[test]
    fn test_split_rejects_bad_arguments() {
        let x = vec![1.0, 2.0];
        let y = vec![1.0];
        assert!(train_test_split(&x, &y, 0.5, false, 0).is_err());

        let y2 = vec![1.0, 2.0];
        assert!(train_test_split(&x, &y2, 0.0, false, 0).is_err());
        assert!(train_test_split(&x, &y2, 1.0, false, 0).is_err());
    }

    #[test]
    fn test_kfold_covers_every_sample_once() {
        let folds = KFold::new(5).split(100).unwrap();
        assert_eq!(folds.len(), 5);

        let mut seen = vec![0usize; 100];
        for (train, test) in &folds {
            assert_eq!(train.len() + test.len(), 100);
            for &i in test {
                seen[i] += 1;
            }
        }
        assert!(seen.iter().all(|&c| c == 1));
    }

    #[test]
    fn test_kfold_uneven_fold_sizes() {
        let folds = KFold::new(3).split(10).unwrap();
        let sizes: Vec<usize> = folds.iter().map(|(_, test)| test.len()).collect();
        assert_eq!(sizes, vec![4, 3, 3]);
    }

    #[test]
    fn test_kfold_shuffle_is_seeded() {
        let a = KFold::new(4).with_shuffle(true).with_seed(3).split(20).unwrap();
        let b = KFold::new(4).with_shuffle(true).with_seed(3).split(20).unwrap();
        assert_eq!(a, b);

        let c = KFold::new(4).with_shuffle(true).with_seed(4).split(20).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_kfold_rejects_too_few_samples() {
        assert!(KFold::new(5).split(3).is_err());
        assert!(KFold::new(1).split(10).is_err());
    }
}
