//! Feature scaling and missing-value imputation.
//!
//! All transforms take data as rows of `f64` features. Rows must be
//! rectangular; a ragged matrix is a `LengthMismatch` error.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TensaMlError};

/// Degenerate-spread threshold below which a column is left unscaled
const SPREAD_EPSILON: f64 = 1e-10;

fn require_rectangular(data: &[Vec<f64>]) -> Result<usize> {
    if data.is_empty() {
        return Err(TensaMlError::InvalidArgument(
            "cannot fit on empty data".into(),
        ));
    }
    let width = data[0].len();
    for (i, row) in data.iter().enumerate() {
        if row.len() != width {
            return Err(TensaMlError::LengthMismatch(format!(
                "row 0 has {width} features but row {i} has {}",
                row.len()
            )));
        }
    }
    Ok(width)
}

fn require_width(data: &[Vec<f64>], width: usize) -> Result<()> {
    for (i, row) in data.iter().enumerate() {
        if row.len() != width {
            return Err(TensaMlError::LengthMismatch(format!(
                "fitted on {width} features but row {i} has {}",
                row.len()
            )));
        }
    }
    Ok(())
}

/// Per-column standardization to zero mean and unit variance
///
/// Columns whose standard deviation is below the degenerate threshold
/// keep a scale of `1.0`, so `inverse_transform` remains exact.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Vec<f64>,
    scales: Vec<f64>,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fit(&mut self, data: &[Vec<f64>]) -> Result<()> {
        let width = require_rectangular(data)?;
        let n = data.len() as f64;

        self.means = vec![0.0; width];
        for row in data {
            for (m, &v) in self.means.iter_mut().zip(row) {
                *m += v;
            }
        }
        for m in &mut self.means {
            *m /= n;
        }

        self.scales = vec![0.0; width];
        for row in data {
            for ((s, &m), &v) in self.scales.iter_mut().zip(&self.means).zip(row) {
                let d = v - m;
                *s += d * d;
            }
        }
        for s in &mut self.scales {
            *s = (*s / n).sqrt();
            if *s < SPREAD_EPSILON {
                *s = 1.0;
            }
        }
        Ok(())
    }

    pub fn transform(&self, data: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        if self.means.is_empty() {
            return Err(TensaMlError::NotFitted("StandardScaler".into()));
        }
        require_width(data, self.means.len())?;
        Ok(data
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&self.means)
                    .zip(&self.scales)
                    .map(|((&v, &m), &s)| (v - m) / s)
                    .collect()
            })
            .collect())
    }

    pub fn fit_transform(&mut self, data: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        self.fit(data)?;
        self.transform(data)
    }

    pub fn inverse_transform(&self, data: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        if self.means.is_empty() {
            return Err(TensaMlError::NotFitted("StandardScaler".into()));
        }
        require_width(data, self.means.len())?;
        Ok(data
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&self.means)
                    .zip(&self.scales)
                    .map(|((&v, &m), &s)| v * s + m)
                    .collect()
            })
            .collect())
    }
}

/// Per-column rescaling into a target range (default `[0, 1]`)
///
/// Constant columns map to the lower bound of the range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinMaxScaler {
    range_min: f64,
    range_max: f64,
    mins: Vec<f64>,
    spreads: Vec<f64>,
}

impl MinMaxScaler {
    pub fn new() -> Self {
        Self::with_range(0.0, 1.0)
    }

    pub fn with_range(range_min: f64, range_max: f64) -> Self {
        Self {
            range_min,
            range_max,
            mins: Vec::new(),
            spreads: Vec::new(),
        }
    }

    pub fn fit(&mut self, data: &[Vec<f64>]) -> Result<()> {
        let width = require_rectangular(data)?;
        self.mins = vec![f64::INFINITY; width];
        let mut maxs = vec![f64::NEG_INFINITY; width];
        for row in data {
            for ((lo, hi), &v) in self.mins.iter_mut().zip(&mut maxs).zip(row) {
                *lo = lo.min(v);
                *hi = hi.max(v);
            }
        }
        self.spreads = self
            .mins
            .iter()
            .zip(&maxs)
            .map(|(&lo, &hi)| hi - lo)
            .collect();
        Ok(())
    }

    pub fn transform(&self, data: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        if self.mins.is_empty() {
            return Err(TensaMlError::NotFitted("MinMaxScaler".into()));
        }
        require_width(data, self.mins.len())?;
        let out_spread = self.range_max - self.range_min;
        Ok(data
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&self.mins)
                    .zip(&self.spreads)
                    .map(|((&v, &lo), &spread)| {
                        if spread < SPREAD_EPSILON {
                            self.range_min
                        } else {
                            self.range_min + (v - lo) / spread * out_spread
                        }
                    })
                    .collect()
            })
            .collect())
    }

    pub fn fit_transform(&mut self, data: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        self.fit(data)?;
        self.transform(data)
    }

    pub fn inverse_transform(&self, data: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        if self.mins.is_empty() {
            return Err(TensaMlError::NotFitted("MinMaxScaler".into()));
        }
        require_width(data, self.mins.len())?;
        let out_spread = self.range_max - self.range_min;
        Ok(data
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&self.mins)
                    .zip(&self.spreads)
                    .map(|((&v, &lo), &spread)| {
                        if spread < SPREAD_EPSILON {
                            lo
                        } else {
                            lo + (v - self.range_min) / out_spread * spread
                        }
                    })
                    .collect()
            })
            .collect())
    }
}

impl Default for MinMaxScaler {
    fn default() -> Self {
        Self::new()
    }
}

/// Row norm used by [`Normalizer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Norm {
    L1,
    L2,
    Max,
}

/// Stateless per-row normalization to unit norm
///
/// Zero rows (norm below the degenerate threshold) pass through
/// unchanged.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Normalizer {
    pub norm: Norm,
}

impl Normalizer {
    pub fn new(norm: Norm) -> Self {
        Self { norm }
    }

    pub fn transform(&self, data: &[Vec<f64>]) -> Vec<Vec<f64>> {
        data.iter()
            .map(|row| {
                let norm = match self.norm {
                    Norm::L1 => row.iter().map(|v| v.abs()).sum::<f64>(),
                    Norm::L2 => row.iter().map(|v| v * v).sum::<f64>().sqrt(),
                    Norm::Max => row.iter().fold(0.0_f64, |m, &v| m.max(v.abs())),
                };
                if norm < SPREAD_EPSILON {
                    row.clone()
                } else {
                    row.iter().map(|&v| v / norm).collect()
                }
            })
            .collect()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(Norm::L2)
    }
}

/// Fill value policy for [`SimpleImputer`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ImputeStrategy {
    Mean,
    Median,
    Mode,
    Constant(f64),
}

/// Replaces `NaN` entries with a per-column fill value
///
/// `Mean`, `Median` and `Mode` are computed from the non-missing values
/// of each column at fit time; a column with no observed values falls
/// back to `0.0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleImputer {
    strategy: ImputeStrategy,
    fill: Vec<f64>,
}

impl SimpleImputer {
    pub fn new(strategy: ImputeStrategy) -> Self {
        Self {
            strategy,
            fill: Vec::new(),
        }
    }

    pub fn fit(&mut self, data: &[Vec<f64>]) -> Result<()> {
        let width = require_rectangular(data)?;
        self.fill = (0..width)
            .map(|col| {
                let observed: Vec<f64> = data
                    .iter()
                    .map(|row| row[col])
                    .filter(|v| !v.is_nan())
                    .collect();
                Self::fill_value(self.strategy, &observed)
            })
            .collect();
        Ok(())
    }

    fn fill_value(strategy: ImputeStrategy, observed: &[f64]) -> f64 {
        if observed.is_empty() && !matches!(strategy, ImputeStrategy::Constant(_)) {
            return 0.0;
        }
        match strategy {
            ImputeStrategy::Constant(c) => c,
            ImputeStrategy::Mean => observed.iter().sum::<f64>() / observed.len() as f64,
            ImputeStrategy::Median => {
                let mut sorted = observed.to_vec();
                sorted.sort_by(|a, b| a.total_cmp(b));
                let mid = sorted.len() / 2;
                if sorted.len() % 2 == 0 {
                    (sorted[mid - 1] + sorted[mid]) / 2.0
                } else {
                    sorted[mid]
                }
            }
            ImputeStrategy::Mode => {
                let mut counts: Vec<(f64, usize)> = Vec::new();
                for &v in observed {
                    match counts.iter_mut().find(|(k, _)| k.to_bits() == v.to_bits()) {
                        Some((_, c)) => *c += 1,
                        None => counts.push((v, 1)),
                    }
                }
                // ties break toward the smaller value
                counts
                    .into_iter()
                    .max_by(|a, b| a.1.cmp(&b.1).then(b.0.total_cmp(&a.0)))
                    .map(|(v, _)| v)
                    .unwrap_or(0.0)
            }
        }
    }

    pub fn transform(&self, data: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        if self.fill.is_empty() {
            return Err(TensaMlError::NotFitted("SimpleImputer".into()));
        }
        require_width(data, self.fill.len())?;
        Ok(data
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&self.fill)
                    .map(|(&v, &f)| if v.is_nan() { f } else { v })
                    .collect()
            })
            .collect())
    }

    pub fn fit_transform(&mut self, data: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        self.fit(data)?;
        self.transform(data)
    }
}
