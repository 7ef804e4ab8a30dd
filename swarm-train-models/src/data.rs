//! Labeled datasets
//!
//! Each row holds `num_input` features followed by a `num_output` one-hot
//! target. Rows are stored contiguously (row-major) and validated once at
//! construction, so scoring never re-checks widths per row.

use serde::{Deserialize, Serialize};
use swarm_train_core::{Error, Result};

/// Validated, non-empty collection of `(features, one-hot target)` rows.
///
/// Decoding goes through the same checks as [`Dataset::from_rows`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDataset", into = "RawDataset")]
pub struct Dataset {
    values: Vec<f64>,
    len: usize,
    num_input: usize,
    num_output: usize,
}

impl Dataset {
    /// Build a dataset from per-sample rows of width `num_input + num_output`.
    pub fn from_rows<I, R>(num_input: usize, num_output: usize, rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[f64]>,
    {
        if num_input == 0 || num_output == 0 {
            return Err(Error::InvalidParameter(
                "dataset needs at least one feature and one target column",
            ));
        }

        let width = num_input
            .checked_add(num_output)
            .ok_or(Error::InvalidParameter("dataset width overflows"))?;
        let mut values = Vec::new();
        let mut len = 0;
        for row in rows {
            let row = row.as_ref();
            if row.len() != width {
                return Err(Error::ShapeMismatch {
                    expected: width,
                    actual: row.len(),
                });
            }
            values.extend_from_slice(row);
            len += 1;
        }

        if len == 0 {
            return Err(Error::EmptyDataset);
        }

        Ok(Self {
            values,
            len,
            num_input,
            num_output,
        })
    }

    /// Number of rows (always at least one).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false: empty datasets are rejected by [`Dataset::from_rows`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn num_input(&self) -> usize {
        self.num_input
    }

    #[inline]
    pub fn num_output(&self) -> usize {
        self.num_output
    }

    /// Full row width (`num_input + num_output`).
    #[inline]
    pub fn width(&self) -> usize {
        self.num_input + self.num_output
    }

    /// The `idx`-th row split into features and target.
    ///
    /// Panics if `idx >= len`.
    pub fn row(&self, idx: usize) -> (&[f64], &[f64]) {
        let start = idx * self.width();
        let row = &self.values[start..start + self.width()];
        row.split_at(self.num_input)
    }

    /// Iterate rows as `(features, target)` pairs.
    pub fn rows(&self) -> impl Iterator<Item = (&[f64], &[f64])> + '_ {
        self.values
            .chunks_exact(self.width())
            .map(move |row| row.split_at(self.num_input))
    }
}

/// Wire form of [`Dataset`]: the row count is implied by `values`.
#[derive(Serialize, Deserialize)]
struct RawDataset {
    num_input: usize,
    num_output: usize,
    values: Vec<f64>,
}

impl TryFrom<RawDataset> for Dataset {
    type Error = Error;

    fn try_from(raw: RawDataset) -> Result<Self> {
        if raw.num_input == 0 || raw.num_output == 0 {
            return Err(Error::InvalidParameter(
                "dataset needs at least one feature and one target column",
            ));
        }
        let width = raw
            .num_input
            .checked_add(raw.num_output)
            .ok_or(Error::InvalidParameter("dataset width overflows"))?;
        let trailing = raw.values.len() % width;
        if trailing != 0 {
            return Err(Error::ShapeMismatch {
                expected: width,
                actual: trailing,
            });
        }
        Self::from_rows(raw.num_input, raw.num_output, raw.values.chunks_exact(width))
    }
}

impl From<Dataset> for RawDataset {
    fn from(data: Dataset) -> Self {
        Self {
            num_input: data.num_input,
            num_output: data.num_output,
            values: data.values,
        }
    }
}
