//! Categorical label encoding.
//!
//! Both encoders learn a sorted vocabulary of distinct values at fit
//! time; transforming a value absent from the vocabulary is an
//! `UnknownLabel` error rather than a silent extension.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TensaMlError};

fn sorted_classes(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut classes: Vec<f64> = values.collect();
    classes.sort_by(|a, b| a.total_cmp(b));
    classes.dedup_by(|a, b| a.to_bits() == b.to_bits());
    classes
}

fn class_index(classes: &[f64], value: f64) -> Result<usize> {
    classes
        .binary_search_by(|c| c.total_cmp(&value))
        .map_err(|_| TensaMlError::UnknownLabel(format!("{value}")))
}

/// Maps raw label values to dense indices `0..k`
///
/// Classes are sorted ascending, so index order is value order and
/// independent of the order labels were seen in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<f64>,
}

impl LabelEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learned vocabulary, sorted ascending
    pub fn classes(&self) -> &[f64] {
        &self.classes
    }

    pub fn fit(&mut self, labels: &[f64]) -> Result<()> {
        if labels.is_empty() {
            return Err(TensaMlError::InvalidArgument(
                "cannot fit on empty labels".into(),
            ));
        }
        self.classes = sorted_classes(labels.iter().copied());
        Ok(())
    }

    pub fn transform(&self, labels: &[f64]) -> Result<Vec<usize>> {
        if self.classes.is_empty() {
            return Err(TensaMlError::NotFitted("LabelEncoder".into()));
        }
        labels
            .iter()
            .map(|&v| class_index(&self.classes, v))
            .collect()
    }

    pub fn fit_transform(&mut self, labels: &[f64]) -> Result<Vec<usize>> {
        self.fit(labels)?;
        self.transform(labels)
    }

    pub fn inverse_transform(&self, indices: &[usize]) -> Result<Vec<f64>> {
        if self.classes.is_empty() {
            return Err(TensaMlError::NotFitted("LabelEncoder".into()));
        }
        indices
            .iter()
            .map(|&i| {
                self.classes.get(i).copied().ok_or_else(|| {
                    TensaMlError::InvalidArgument(format!(
                        "index {i} out of range for {} classes",
                        self.classes.len()
                    ))
                })
            })
            .collect()
    }
}

/// Expands a single categorical column into `k` indicator columns
///
/// Column order follows the sorted vocabulary, matching
/// [`LabelEncoder`] index order for the same data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OneHotEncoder {
    classes: Vec<f64>,
}

impl OneHotEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classes(&self) -> &[f64] {
        &self.classes
    }

    pub fn fit(&mut self, data: &[Vec<f64>]) -> Result<()> {
        if data.is_empty() {
            return Err(TensaMlError::InvalidArgument(
                "cannot fit on empty data".into(),
            ));
        }
        for (i, row) in data.iter().enumerate() {
            if row.len() != 1 {
                return Err(TensaMlError::LengthMismatch(format!(
                    "expected single-column rows, row {i} has {} values",
                    row.len()
                )));
            }
        }
        self.classes = sorted_classes(data.iter().map(|row| row[0]));
        Ok(())
    }

    pub fn transform(&self, data: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        if self.classes.is_empty() {
            return Err(TensaMlError::NotFitted("OneHotEncoder".into()));
        }
        data.iter()
            .map(|row| {
                let idx = class_index(&self.classes, row[0])?;
                let mut hot = vec![0.0; self.classes.len()];
                hot[idx] = 1.0;
                Ok(hot)
            })
            .collect()
    }

    pub fn fit_transform(&mut self, data: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        self.fit(data)?;
        self.transform(data)
    }
}
