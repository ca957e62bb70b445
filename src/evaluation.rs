use log::warn;
use ndarray::ArrayView1;

use crate::error::{Error, Result};

/// Tally of predicted against true binary labels.
///
/// `total` counts every compared pair, so a prediction that is neither 0 nor 1
/// (a NaN label, say) lowers accuracy without landing in any cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    pub true_positives: usize,
    pub true_negatives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub total: usize,
}

impl ConfusionMatrix {
    /// Returns the matrix with one more compared pair.
    pub fn record(self, predicted: f64, actual: f64) -> Self {
        let mut next = ConfusionMatrix {
            total: self.total + 1,
            ..self
        };

        if predicted == 1.0 && actual == 1.0 {
            next.true_positives += 1;
        } else if predicted == 0.0 && actual == 0.0 {
            next.true_negatives += 1;
        } else if predicted == 1.0 && actual == 0.0 {
            next.false_positives += 1;
        } else if predicted == 0.0 && actual == 1.0 {
            next.false_negatives += 1;
        }

        next
    }

    pub fn correct(&self) -> usize {
        self.true_positives + self.true_negatives
    }

    pub fn accuracy(&self) -> f64 {
        self.correct() as f64 / self.total as f64
    }

    /// True positive rate.
    pub fn sensitivity(&self) -> f64 {
        self.true_positives as f64 / (self.true_positives + self.false_negatives) as f64
    }

    /// True negative rate.
    pub fn specificity(&self) -> f64 {
        self.true_negatives as f64 / (self.true_negatives + self.false_positives) as f64
    }
}

/// Compares decided labels with the truth, pair by pair.
pub fn evaluate(predicted: ArrayView1<f64>, actual: ArrayView1<f64>) -> Result<ConfusionMatrix> {
    if predicted.len() != actual.len() {
        return Err(Error::LengthMismatch {
            left: predicted.len(),
            right: actual.len(),
        });
    }

    let matrix = predicted
        .iter()
        .zip(actual.iter())
        .fold(ConfusionMatrix::default(), |acc, (&p, &a)| acc.record(p, a));

    for (name, value) in [
        ("accuracy", matrix.accuracy()),
        ("sensitivity", matrix.sensitivity()),
        ("specificity", matrix.specificity()),
    ] {
        if value.is_nan() {
            warn!("{} is undefined (zero denominator)", name);
        }
    }

    Ok(matrix)
}
