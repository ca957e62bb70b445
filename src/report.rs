//! Console report formatting. Everything writes to any `io::Write` so the
//! binary can hand in stdout and tests a buffer.

use std::io::{self, Write};
use std::time::Duration;

use crate::evaluation::ConfusionMatrix;
use crate::experiment::{BayesOutcome, ExploreOutcome, LogisticOutcome};
use crate::stats::Summary;

fn write_header<W: Write>(out: &mut W, heading: &str, observations: usize) -> io::Result<()> {
    writeln!(out, "Heading: {}", heading)?;
    writeln!(out, "Number of records: {}", observations)
}

fn write_summary<W: Write>(out: &mut W, name: &str, summary: &Summary) -> io::Result<()> {
    writeln!(out, "\nStats for {}", name)?;
    writeln!(out, "Sum: {}", summary.sum)?;
    writeln!(out, "Mean: {}", summary.mean)?;
    writeln!(out, "Median: {}", summary.median)?;
    writeln!(out, "Range: {} - {}", summary.range.min, summary.range.max)
}

pub fn write_metrics<W: Write>(out: &mut W, confusion: &ConfusionMatrix) -> io::Result<()> {
    writeln!(
        out,
        "TP: {}  TN: {}  FP: {}  FN: {}",
        confusion.true_positives,
        confusion.true_negatives,
        confusion.false_positives,
        confusion.false_negatives
    )?;
    writeln!(out, "Accuracy: {}", confusion.accuracy())?;
    writeln!(out, "Sensitivity: {}", confusion.sensitivity())?;
    writeln!(out, "Specificity: {}", confusion.specificity())
}

pub fn write_explore<W: Write>(out: &mut W, outcome: &ExploreOutcome) -> io::Result<()> {
    write_header(out, &outcome.heading, outcome.observations)?;
    for (name, summary) in &outcome.summaries {
        write_summary(out, name, summary)?;
    }
    writeln!(out, "\nCovariance = {}", outcome.covariance)?;
    writeln!(out, "\nCorrelation = {}", outcome.correlation)
}

pub fn write_logistic<W: Write>(out: &mut W, outcome: &LogisticOutcome) -> io::Result<()> {
    write_header(out, &outcome.heading, outcome.observations)?;
    writeln!(out, "Feature: {}", outcome.feature.name())?;
    writeln!(out, "Weights: {}", outcome.weights)?;
    write_metrics(out, &outcome.confusion)
}

pub fn write_bayes<W: Write>(out: &mut W, outcome: &BayesOutcome) -> io::Result<()> {
    let model = &outcome.model;
    write_header(out, &outcome.heading, outcome.observations)?;

    let priors = model.priors();
    writeln!(out, "Apriori: [{}, {}]", priors[0], priors[1])?;
    writeln!(
        out,
        "Likelihood values for p(pclass|survived):\n{}",
        model.pclass_likelihoods()
    )?;
    writeln!(
        out,
        "Likelihood values for p(sex|survived):\n{}",
        model.sex_likelihoods()
    )?;

    let age = model.age_parameters();
    writeln!(out, "Mean age for survived: [{}, {}]", age[0].mean, age[1].mean)?;
    writeln!(
        out,
        "Variance age for survived: [{}, {}]",
        age[0].variance, age[1].variance
    )?;
    write_metrics(out, &outcome.confusion)
}

/// Elapsed time in whole and fractional milliseconds, then the closing line.
pub fn write_footer<W: Write>(out: &mut W, elapsed: Duration) -> io::Result<()> {
    writeln!(out, "{}ms", elapsed.as_millis())?;
    writeln!(out, "{}ms", elapsed.as_nanos() as f64 / 1e6)?;
    writeln!(out, "\nProgram Terminated.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::ValueRange;

    #[test]
    fn test_write_explore() {
        let outcome = ExploreOutcome {
            heading: "rm,medv".to_string(),
            observations: 2,
            summaries: vec![(
                "rm".to_string(),
                Summary {
                    sum: 3.0,
                    mean: 1.5,
                    median: 1.5,
                    range: ValueRange { min: 1.0, max: 2.0 },
                },
            )],
            covariance: 0.5,
            correlation: 1.0,
        };

        let mut buf = Vec::new();
        write_explore(&mut buf, &outcome).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Heading: rm,medv\nNumber of records: 2\n"));
        assert!(text.contains("\nStats for rm\nSum: 3\nMean: 1.5\nMedian: 1.5\nRange: 1 - 2\n"));
        assert!(text.contains("Covariance = 0.5"));
        assert!(text.contains("Correlation = 1"));
    }

    #[test]
    fn test_write_metrics_and_footer() {
        let confusion = ConfusionMatrix {
            true_positives: 1,
            true_negatives: 2,
            false_positives: 1,
            false_negatives: 0,
            total: 4,
        };
        let mut buf = Vec::new();
        write_metrics(&mut buf, &confusion).unwrap();
        write_footer(&mut buf, Duration::from_micros(12_500)).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("Accuracy: 0.75\n"));
        assert!(text.contains("Sensitivity: 1\n"));
        assert!(text.contains("12ms\n12.5ms\n"));
        assert!(text.ends_with("Program Terminated.\n"));
    }
}
