use log::{debug, info};
use ndarray::{Array1, Array2};
use std::{f64::consts::PI, str::FromStr};

use crate::dataset::{Dataset, Observation};
use crate::error::{Error, Result};

/// Which rows the likelihood tables and age parameters are counted over.
/// Priors always come from the training partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LikelihoodScope {
    /// Training and test rows together.
    #[default]
    FullDataset,
    TrainingOnly,
}

impl FromStr for LikelihoodScope {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" | "full_dataset" => Ok(LikelihoodScope::FullDataset),
            "train" | "training_only" => Ok(LikelihoodScope::TrainingOnly),
            _ => Err(format!(
                "Unknown likelihood scope: {}. Expected `full` or `train`",
                s
            )),
        }
    }
}

/// Normal distribution parameters of age within one class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gaussian {
    pub mean: f64,
    /// Sample variance (`n - 1` denominator).
    pub variance: f64,
}

impl Gaussian {
    pub fn density(&self, x: f64) -> f64 {
        1.0 / (2.0 * PI * self.variance).sqrt()
            * (-(x - self.mean).powi(2) / (2.0 * self.variance)).exp()
    }
}

pub struct NaiveBayesClassifier {
    priors: [f64; 2],
    pclass_likelihoods: Array2<f64>,
    sex_likelihoods: Array2<f64>,
    age: [Gaussian; 2],
}

fn count_where<F: Fn(&Observation) -> bool>(rows: &[Observation], predicate: F) -> f64 {
    rows.iter()
        .fold(0, |acc, row| if predicate(row) { acc + 1 } else { acc }) as f64
}

impl NaiveBayesClassifier {
    pub fn fit(dataset: &Dataset, scope: LikelihoodScope) -> Result<Self> {
        let train = dataset.train();
        if train.is_empty() {
            return Err(Error::EmptyInput("naive Bayes training partition"));
        }

        // Calculate the class priors from the training rows:
        let num_survived = count_where(train, |row| row.survived() == 1);
        let survived_prior = num_survived / train.len() as f64;
        let priors = [1.0 - survived_prior, survived_prior];

        let rows = match scope {
            LikelihoodScope::FullDataset => dataset.observations(),
            LikelihoodScope::TrainingOnly => train,
        };
        info!(
            "Estimating naive Bayes tables over {} rows ({:?})",
            rows.len(),
            scope
        );

        let class_counts = [0u8, 1].map(|class| count_where(rows, |row| row.survived() == class));

        // P(pclass | survived), one row per class:
        let pclass_likelihoods = Array2::from_shape_fn((2, 3), |(class, pclass)| {
            count_where(rows, |row| {
                row.survived() as usize == class && row.passenger_class() as usize == pclass + 1
            }) / class_counts[class]
        });

        // P(sex | survived):
        let sex_likelihoods = Array2::from_shape_fn((2, 2), |(class, sex)| {
            count_where(rows, |row| {
                row.survived() as usize == class && row.sex() as usize == sex
            }) / class_counts[class]
        });

        // Age mean and variance for each class:
        let age = [0u8, 1].map(|class| {
            let ages = rows
                .iter()
                .filter(|row| row.survived() == class)
                .map(Observation::age);
            let mean = ages.clone().sum::<f64>() / class_counts[class as usize];
            let variance = ages.map(|age| (age - mean).powi(2)).sum::<f64>()
                / (class_counts[class as usize] - 1.0);
            Gaussian { mean, variance }
        });

        debug!("priors: {:?}", priors);
        debug!("p(pclass|survived):\n{}", pclass_likelihoods);
        debug!("p(sex|survived):\n{}", sex_likelihoods);
        debug!("age parameters: {:?}", age);

        Ok(NaiveBayesClassifier {
            priors,
            pclass_likelihoods,
            sex_likelihoods,
            age,
        })
    }

    /// `[P(survived = 0), P(survived = 1)]`.
    pub fn priors(&self) -> [f64; 2] {
        self.priors
    }

    /// Rows are classes, columns passenger classes 1 through 3.
    pub fn pclass_likelihoods(&self) -> &Array2<f64> {
        &self.pclass_likelihoods
    }

    /// Rows are classes, columns sex 0 and 1.
    pub fn sex_likelihoods(&self) -> &Array2<f64> {
        &self.sex_likelihoods
    }

    pub fn age_parameters(&self) -> [Gaussian; 2] {
        self.age
    }

    /// Normalized `[P(survived = 0 | x), P(survived = 1 | x)]`.
    ///
    /// Both entries are NaN when neither class gives the observation any
    /// likelihood.
    pub fn raw_probabilities(&self, observation: &Observation) -> [f64; 2] {
        let pclass = observation.passenger_class() as usize - 1;
        let sex = observation.sex() as usize;

        let joint = [0, 1].map(|class| {
            self.pclass_likelihoods[[class, pclass]]
                * self.sex_likelihoods[[class, sex]]
                * self.priors[class]
                * self.age[class].density(observation.age())
        });

        let evidence = joint[0] + joint[1];
        [joint[0] / evidence, joint[1] / evidence]
    }

    pub fn posterior(&self, observation: &Observation) -> f64 {
        self.raw_probabilities(observation)[1]
    }

    /// Label 1 when the survival posterior is above one half, else 0.
    pub fn predict_one(&self, observation: &Observation) -> f64 {
        if self.posterior(observation) > 0.5 {
            1.0
        } else {
            0.0
        }
    }

    pub fn predict(&self, rows: &[Observation]) -> Array1<f64> {
        rows.iter().map(|row| self.predict_one(row)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn obs(pclass: u8, survived: u8, sex: u8, age: f64) -> Observation {
        Observation::new(pclass, survived, sex, age).unwrap()
    }

    fn small_dataset() -> Dataset {
        let rows = vec![
            obs(1, 1, 0, 30.0),
            obs(3, 0, 1, 40.0),
            obs(2, 1, 0, 20.0),
            obs(3, 0, 1, 50.0),
            // test rows
            obs(1, 1, 1, 10.0),
            obs(3, 0, 0, 60.0),
        ];
        Dataset::new(rows, 4).unwrap()
    }

    #[test]
    fn test_priors_sum_to_one() {
        let model = NaiveBayesClassifier::fit(&small_dataset(), LikelihoodScope::default()).unwrap();
        let priors = model.priors();
        assert_eq!(priors[1], 0.5);
        assert_relative_eq!(priors[0] + priors[1], 1.0);

        let rows = vec![
            obs(1, 1, 0, 30.0),
            obs(3, 0, 1, 40.0),
            obs(3, 0, 1, 41.0),
        ];
        let model =
            NaiveBayesClassifier::fit(&Dataset::new(rows, 3).unwrap(), LikelihoodScope::TrainingOnly)
                .unwrap();
        assert_relative_eq!(model.priors()[1], 1.0 / 3.0);
        assert_relative_eq!(model.priors()[0] + model.priors()[1], 1.0);
    }

    #[test]
    fn test_full_dataset_tables() {
        let model = NaiveBayesClassifier::fit(&small_dataset(), LikelihoodScope::FullDataset).unwrap();

        let pclass = model.pclass_likelihoods();
        assert_relative_eq!(pclass[[1, 0]], 2.0 / 3.0);
        assert_relative_eq!(pclass[[1, 1]], 1.0 / 3.0);
        assert_eq!(pclass[[1, 2]], 0.0);
        assert_eq!(pclass[[0, 2]], 1.0);

        let sex = model.sex_likelihoods();
        assert_relative_eq!(sex[[0, 1]], 2.0 / 3.0);
        assert_relative_eq!(sex[[1, 0]], 2.0 / 3.0);

        for class in 0..2 {
            assert_relative_eq!(pclass.row(class).sum(), 1.0);
            assert_relative_eq!(sex.row(class).sum(), 1.0);
        }

        let age = model.age_parameters();
        assert_relative_eq!(age[1].mean, 20.0);
        assert_relative_eq!(age[1].variance, 100.0);
        assert_relative_eq!(age[0].mean, 50.0);
        assert_relative_eq!(age[0].variance, 100.0);
    }

    #[test]
    fn test_training_only_tables() {
        let model = NaiveBayesClassifier::fit(&small_dataset(), LikelihoodScope::TrainingOnly).unwrap();

        assert_eq!(model.pclass_likelihoods()[[1, 0]], 0.5);
        assert_eq!(model.pclass_likelihoods()[[1, 1]], 0.5);
        assert_eq!(model.sex_likelihoods()[[1, 0]], 1.0);
        assert_eq!(model.sex_likelihoods()[[0, 1]], 1.0);

        let age = model.age_parameters();
        assert_relative_eq!(age[1].mean, 25.0);
        assert_relative_eq!(age[1].variance, 50.0);
        assert_relative_eq!(age[0].mean, 45.0);
        assert_relative_eq!(age[0].variance, 50.0);
    }

    #[test]
    fn test_gaussian_density() {
        let standard = Gaussian {
            mean: 0.0,
            variance: 1.0,
        };
        assert_relative_eq!(standard.density(0.0), 1.0 / (2.0 * PI).sqrt());
        assert_relative_eq!(standard.density(1.5), standard.density(-1.5));
        assert!(standard.density(0.0) > standard.density(1.0));
    }

    #[test]
    fn test_predict_test_rows() {
        let dataset = small_dataset();
        let model = NaiveBayesClassifier::fit(&dataset, LikelihoodScope::FullDataset).unwrap();

        let [died, survived] = model.raw_probabilities(&dataset.test()[0]);
        assert_relative_eq!(died + survived, 1.0);
        assert_eq!(survived, 1.0);

        assert_eq!(model.predict(dataset.test()).to_vec(), vec![1.0, 0.0]);
    }

    #[test]
    fn test_zero_evidence_is_nan() {
        let model = NaiveBayesClassifier::fit(&small_dataset(), LikelihoodScope::TrainingOnly).unwrap();
        // no training survivor is sex 1 and no training casualty is in class 2
        let query = obs(2, 0, 1, 25.0);
        assert!(model.posterior(&query).is_nan());
        assert_eq!(model.predict_one(&query), 0.0);
    }

    #[test]
    fn test_empty_training_partition() {
        let dataset = Dataset::new(vec![obs(1, 1, 0, 30.0)], 0).unwrap();
        assert!(matches!(
            NaiveBayesClassifier::fit(&dataset, LikelihoodScope::FullDataset),
            Err(Error::EmptyInput(_))
        ));
    }

    #[test]
    fn test_scope_from_str() {
        assert_eq!("full".parse::<LikelihoodScope>().unwrap(), LikelihoodScope::FullDataset);
        assert_eq!("TRAIN".parse::<LikelihoodScope>().unwrap(), LikelihoodScope::TrainingOnly);
        assert!("test".parse::<LikelihoodScope>().is_err());
    }
}
