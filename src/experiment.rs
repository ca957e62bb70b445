//! End-to-end runs: load, split, fit on the training rows, score the rest.

use log::info;
use ndarray::Array1;

use crate::bayes::NaiveBayesClassifier;
use crate::config::{ClassifierConfig, ExploreConfig};
use crate::dataset::{load_numeric_table, load_passengers, Dataset, DesignMatrix, Feature};
use crate::error::Result;
use crate::evaluation::{evaluate, ConfusionMatrix};
use crate::logistic::LogisticRegression;
use crate::stats::{correlation, covariance, describe, Summary};

pub struct LogisticOutcome {
    pub heading: String,
    pub observations: usize,
    pub feature: Feature,
    pub weights: Array1<f64>,
    pub confusion: ConfusionMatrix,
}

pub struct BayesOutcome {
    pub heading: String,
    pub observations: usize,
    pub model: NaiveBayesClassifier,
    pub confusion: ConfusionMatrix,
}

pub struct ExploreOutcome {
    pub heading: String,
    pub observations: usize,
    pub summaries: Vec<(String, Summary)>,
    pub covariance: f64,
    pub correlation: f64,
}

fn load_dataset(config: &ClassifierConfig) -> Result<(String, Dataset)> {
    let table = load_passengers(&config.input_path, config.max_rows)?;
    let dataset = Dataset::new(table.observations, config.train_row_count)?;
    info!(
        "{} observations: {} train, {} test",
        dataset.len(),
        dataset.train().len(),
        dataset.test().len()
    );
    Ok((table.heading, dataset))
}

pub fn run_logistic(config: &ClassifierConfig) -> Result<LogisticOutcome> {
    let (heading, dataset) = load_dataset(config)?;

    let train = DesignMatrix::from_observations(dataset.train(), config.feature);
    let mut model = LogisticRegression::new()
        .with_iterations(config.iteration_count)
        .with_step_size(config.step_size);
    model.fit(&train.features, &train.labels)?;

    let test = DesignMatrix::from_observations(dataset.test(), config.feature);
    let predicted = model.predict(&test.features)?;
    let confusion = evaluate(predicted.view(), test.labels.view())?;

    Ok(LogisticOutcome {
        heading,
        observations: dataset.len(),
        feature: config.feature,
        weights: model.weights().clone(),
        confusion,
    })
}

pub fn run_bayes(config: &ClassifierConfig) -> Result<BayesOutcome> {
    let (heading, dataset) = load_dataset(config)?;

    let model = NaiveBayesClassifier::fit(&dataset, config.likelihood_scope)?;
    let predicted = model.predict(dataset.test());
    let actual: Array1<f64> = dataset
        .test()
        .iter()
        .map(|row| row.survived() as f64)
        .collect();
    let confusion = evaluate(predicted.view(), actual.view())?;

    Ok(BayesOutcome {
        heading,
        observations: dataset.len(),
        model,
        confusion,
    })
}

pub fn run_explore(config: &ExploreConfig) -> Result<ExploreOutcome> {
    let table = load_numeric_table(&config.input_path, config.max_rows)?;
    let x = table.column(&config.x_column)?;
    let y = table.column(&config.y_column)?;

    Ok(ExploreOutcome {
        heading: table.heading(),
        observations: table.len(),
        summaries: vec![
            (config.x_column.clone(), describe(x)?),
            (config.y_column.clone(), describe(y)?),
        ],
        covariance: covariance(x, y)?,
        correlation: correlation(x, y)?,
    })
}
