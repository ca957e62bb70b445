//! Descriptive statistics for exploratory reports.
//!
//! Every function rejects an empty input. NaN results (for example the
//! correlation of a constant column) are returned as-is.

use crate::error::{Error, Result};

/// Smallest and largest value of a sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

/// Per-variable summary printed by the exploration report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub sum: f64,
    pub mean: f64,
    pub median: f64,
    pub range: ValueRange,
}

fn non_empty(v: &[f64], operation: &'static str) -> Result<()> {
    if v.is_empty() {
        return Err(Error::EmptyInput(operation));
    }
    Ok(())
}

fn same_length(x: &[f64], y: &[f64]) -> Result<()> {
    if x.len() != y.len() {
        return Err(Error::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    Ok(())
}

pub fn sum(v: &[f64]) -> Result<f64> {
    non_empty(v, "sum")?;
    Ok(v.iter().sum())
}

pub fn mean(v: &[f64]) -> Result<f64> {
    non_empty(v, "mean")?;
    Ok(sum(v)? / v.len() as f64)
}

/// Median by position: the centre element, or the average of the two centre
/// elements for an even length. The input is not sorted here; callers that
/// want the statistical median must pass sorted data.
pub fn median(v: &[f64]) -> Result<f64> {
    non_empty(v, "median")?;
    let mid = v.len() / 2;
    if v.len() % 2 == 0 {
        Ok((v[mid] + v[mid - 1]) / 2.0)
    } else {
        Ok(v[mid])
    }
}

pub fn range(v: &[f64]) -> Result<ValueRange> {
    non_empty(v, "range")?;
    let first = ValueRange {
        min: v[0],
        max: v[0],
    };

    Ok(v.iter().fold(first, |acc, &value| ValueRange {
        min: if value < acc.min { value } else { acc.min },
        max: if value > acc.max { value } else { acc.max },
    }))
}

/// Sample covariance with an `n - 1` denominator.
pub fn covariance(x: &[f64], y: &[f64]) -> Result<f64> {
    same_length(x, y)?;
    non_empty(x, "covariance")?;
    if x.len() < 2 {
        return Err(Error::DegenerateInput {
            operation: "covariance",
            len: x.len(),
        });
    }

    let x_mean = mean(x)?;
    let y_mean = mean(y)?;
    let cross: f64 = x
        .iter()
        .zip(y.iter())
        .map(|(&xi, &yi)| (xi - x_mean) * (yi - y_mean))
        .sum();

    Ok(cross / (x.len() - 1) as f64)
}

/// Pearson correlation. NaN when either input has zero variance.
pub fn correlation(x: &[f64], y: &[f64]) -> Result<f64> {
    let cov = covariance(x, y)?;
    let var_x = covariance(x, x)?;
    let var_y = covariance(y, y)?;
    Ok(cov / (var_x * var_y).sqrt())
}

pub fn describe(v: &[f64]) -> Result<Summary> {
    Ok(Summary {
        sum: sum(v)?,
        mean: mean(v)?,
        median: median(v)?,
        range: range(v)?,
    })
}
