//! Binary classifiers built from first principles on a passenger table:
//! logistic regression by batch gradient ascent and a categorical/Gaussian
//! naive Bayes, scored on a held-out suffix of the rows. A small set of
//! descriptive statistics backs the exploration report.
pub mod bayes;
pub mod config;
pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod experiment;
pub mod logistic;
pub mod report;
pub mod stats;

pub use error::{Error, Result};
