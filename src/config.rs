use clap::{Arg, ArgMatches, Command, ValueHint};
use std::path::PathBuf;
use std::str::FromStr;

use crate::bayes::LikelihoodScope;
use crate::dataset::Feature;
use crate::logistic::{DEFAULT_ITERATIONS, DEFAULT_STEP_SIZE};

/// Run parameters shared by the two classifier commands.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    pub input_path: PathBuf,
    /// Rows before this index train the model, the rest are held out.
    pub train_row_count: usize,
    pub max_rows: usize,
    pub iteration_count: usize,
    pub step_size: f64,
    pub feature: Feature,
    pub likelihood_scope: LikelihoodScope,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("titanic_project.csv"),
            train_row_count: 800,
            max_rows: 1100,
            iteration_count: DEFAULT_ITERATIONS,
            step_size: DEFAULT_STEP_SIZE,
            feature: Feature::default(),
            likelihood_scope: LikelihoodScope::default(),
        }
    }
}

impl ClassifierConfig {
    pub fn with_input_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.input_path = path.into();
        self
    }

    pub fn with_train_row_count(mut self, train_row_count: usize) -> Self {
        self.train_row_count = train_row_count;
        self
    }

    pub fn with_likelihood_scope(mut self, scope: LikelihoodScope) -> Self {
        self.likelihood_scope = scope;
        self
    }

    /// Overrides defaults with whatever was given on the command line.
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let mut config = Self::default();
        if let Some(path) = matches.get_one::<PathBuf>("input") {
            config.input_path = path.clone();
        }
        if let Some(&rows) = matches.get_one::<usize>("train_rows") {
            config.train_row_count = rows;
        }
        if let Some(&rows) = matches.get_one::<usize>("max_rows") {
            config.max_rows = rows;
        }
        if let Some(&iterations) = matches.try_get_one::<usize>("iterations").ok().flatten() {
            config.iteration_count = iterations;
        }
        if let Some(&step) = matches.try_get_one::<f64>("step_size").ok().flatten() {
            config.step_size = step;
        }
        if let Some(&feature) = matches.try_get_one::<Feature>("feature").ok().flatten() {
            config.feature = feature;
        }
        if let Some(&scope) = matches
            .try_get_one::<LikelihoodScope>("likelihood_scope")
            .ok()
            .flatten()
        {
            config.likelihood_scope = scope;
        }
        config
    }
}

/// Parameters of the descriptive-statistics report.
#[derive(Debug, Clone, PartialEq)]
pub struct ExploreConfig {
    pub input_path: PathBuf,
    pub max_rows: usize,
    pub x_column: String,
    pub y_column: String,
}

impl Default for ExploreConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("Boston.csv"),
            max_rows: 1000,
            x_column: "rm".to_string(),
            y_column: "medv".to_string(),
        }
    }
}

impl ExploreConfig {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let mut config = Self::default();
        if let Some(path) = matches.get_one::<PathBuf>("input") {
            config.input_path = path.clone();
        }
        if let Some(&rows) = matches.get_one::<usize>("max_rows") {
            config.max_rows = rows;
        }
        if let Some(mut columns) = matches.get_many::<String>("columns") {
            if let (Some(x), Some(y)) = (columns.next(), columns.next()) {
                config.x_column = x.clone();
                config.y_column = y.clone();
            }
        }
        config
    }
}

fn input_arg(default_file: &'static str) -> Arg {
    Arg::new("input")
        .help(format!("Path to the input CSV file [default: {}]", default_file))
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

fn max_rows_arg() -> Arg {
    Arg::new("max_rows")
        .long("max-rows")
        .help("Maximum number of data rows accepted from the input")
        .value_parser(clap::value_parser!(usize))
}

fn classifier_command(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .arg(input_arg("titanic_project.csv"))
        .arg(
            Arg::new("train_rows")
                .short('t')
                .long("train-rows")
                .help("Number of leading rows used for training [default: 800]")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(max_rows_arg())
}

pub fn build_cli() -> Command {
    Command::new("titanic_scratch")
        .version(clap::crate_version!())
        .about("Logistic regression and naive Bayes written from scratch, plus descriptive statistics")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("explore")
                .about("Print descriptive statistics, covariance and correlation of two columns")
                .arg(input_arg("Boston.csv"))
                .arg(max_rows_arg())
                .arg(
                    Arg::new("columns")
                        .short('c')
                        .long("columns")
                        .num_args(2)
                        .value_names(["X", "Y"])
                        .help("Names of the two columns to compare [default: rm medv]"),
                ),
        )
        .subcommand(
            classifier_command(
                "logistic",
                "Fit a logistic regression on one feature and score the held-out rows",
            )
            .arg(
                Arg::new("iterations")
                    .short('i')
                    .long("iterations")
                    .help("Number of gradient-ascent passes [default: 1000]")
                    .value_parser(clap::value_parser!(usize)),
            )
            .arg(
                Arg::new("step_size")
                    .long("step-size")
                    .help("Multiplier applied to each gradient update [default: 1.0]")
                    .value_parser(clap::value_parser!(f64)),
            )
            .arg(
                Arg::new("feature")
                    .short('f')
                    .long("feature")
                    .help("Predictor column: sex, pclass or age [default: sex]")
                    .value_parser(Feature::from_str),
            ),
        )
        .subcommand(
            classifier_command(
                "bayes",
                "Estimate a naive Bayes model on class, sex and age and score the held-out rows",
            )
            .arg(
                Arg::new("likelihood_scope")
                    .long("likelihood-scope")
                    .help(
                        "Rows the likelihood tables are counted over: `full` (train and test) \
                         or `train` [default: full]",
                    )
                    .value_parser(LikelihoodScope::from_str),
            ),
        )
}
