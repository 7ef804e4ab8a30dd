//! Thirty-row sample of Fisher's iris data.
//!
//! Columns are sepal length, sepal width, petal length, petal width, then a
//! one-hot species: virginica `1 0 0`, versicolor `0 1 0`, setosa `0 0 1`.

use crate::{Dataset, Result};

/// Feature columns per row.
pub const NUM_INPUT: usize = 4;
/// Species columns per row.
pub const NUM_OUTPUT: usize = 3;

/// Training rows.
pub const TRAIN_ROWS: [[f64; 7]; 24] = [
    [6.3, 2.9, 5.6, 1.8, 1.0, 0.0, 0.0],
    [6.9, 3.1, 4.9, 1.5, 0.0, 1.0, 0.0],
    [4.6, 3.4, 1.4, 0.3, 0.0, 0.0, 1.0],
    [7.2, 3.6, 6.1, 2.5, 1.0, 0.0, 0.0],
    [4.7, 3.2, 1.3, 0.2, 0.0, 0.0, 1.0],
    [4.9, 3.0, 1.4, 0.2, 0.0, 0.0, 1.0],
    [7.6, 3.0, 6.6, 2.1, 1.0, 0.0, 0.0],
    [4.9, 2.4, 3.3, 1.0, 0.0, 1.0, 0.0],
    [5.4, 3.9, 1.7, 0.4, 0.0, 0.0, 1.0],
    [4.9, 3.1, 1.5, 0.1, 0.0, 0.0, 1.0],
    [5.0, 3.6, 1.4, 0.2, 0.0, 0.0, 1.0],
    [6.4, 3.2, 4.5, 1.5, 0.0, 1.0, 0.0],
    [4.4, 2.9, 1.4, 0.2, 0.0, 0.0, 1.0],
    [5.8, 2.7, 5.1, 1.9, 1.0, 0.0, 0.0],
    [6.3, 3.3, 6.0, 2.5, 1.0, 0.0, 0.0],
    [5.2, 2.7, 3.9, 1.4, 0.0, 1.0, 0.0],
    [7.0, 3.2, 4.7, 1.4, 0.0, 1.0, 0.0],
    [6.5, 2.8, 4.6, 1.5, 0.0, 1.0, 0.0],
    [4.9, 2.5, 4.5, 1.7, 1.0, 0.0, 0.0],
    [5.7, 2.8, 4.5, 1.3, 0.0, 1.0, 0.0],
    [5.0, 3.4, 1.5, 0.2, 0.0, 0.0, 1.0],
    [6.5, 3.0, 5.8, 2.2, 1.0, 0.0, 0.0],
    [5.5, 2.3, 4.0, 1.3, 0.0, 1.0, 0.0],
    [6.7, 2.5, 5.8, 1.8, 1.0, 0.0, 0.0],
];

/// Held-out rows.
pub const TEST_ROWS: [[f64; 7]; 6] = [
    [4.6, 3.1, 1.5, 0.2, 0.0, 0.0, 1.0],
    [7.1, 3.0, 5.9, 2.1, 1.0, 0.0, 0.0],
    [5.1, 3.5, 1.4, 0.2, 0.0, 0.0, 1.0],
    [6.3, 3.3, 4.7, 1.6, 0.0, 1.0, 0.0],
    [6.6, 2.9, 4.6, 1.3, 0.0, 1.0, 0.0],
    [7.3, 2.9, 6.3, 1.8, 1.0, 0.0, 0.0],
];

pub fn train_set() -> Result<Dataset> {
    Ok(Dataset::from_rows(NUM_INPUT, NUM_OUTPUT, &TRAIN_ROWS)?)
}

pub fn test_set() -> Result<Dataset> {
    Ok(Dataset::from_rows(NUM_INPUT, NUM_OUTPUT, &TEST_ROWS)?)
}
