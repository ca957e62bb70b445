//! Loading of the delimited input tables and partitioning into train/test rows.
//!
//! Two schemas are supported: the passenger table used by the classifiers
//! (`index, passenger_class, survived, sex, age`) and a free-form numeric
//! table used by the exploration report.

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info};
use ndarray::{Array1, Array2};
use std::{fs::File, io::BufReader, path::Path, str::FromStr};

use crate::error::{Error, Result};

/// Upper bound on the rows reserved up front; `max_rows` is only a hint.
const PREALLOC_LIMIT: usize = 4096;

/// One passenger row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    passenger_class: u8,
    survived: u8,
    sex: u8,
    age: f64,
}

impl Observation {
    /// Builds an observation, rejecting values outside each field's domain:
    /// class in `1..=3`, survived and sex in `0..=1`, age `>= 0`.
    pub fn new(passenger_class: u8, survived: u8, sex: u8, age: f64) -> Result<Self> {
        let out_of_domain = |field: &'static str, value: String| Error::Parse {
            line: 0,
            field,
            value,
        };

        if !(1..=3).contains(&passenger_class) {
            return Err(out_of_domain("passenger_class", passenger_class.to_string()));
        }
        if survived > 1 {
            return Err(out_of_domain("survived", survived.to_string()));
        }
        if sex > 1 {
            return Err(out_of_domain("sex", sex.to_string()));
        }
        if age.is_nan() || age < 0.0 {
            return Err(out_of_domain("age", age.to_string()));
        }

        Ok(Observation {
            passenger_class,
            survived,
            sex,
            age,
        })
    }

    pub fn passenger_class(&self) -> u8 {
        self.passenger_class
    }

    pub fn survived(&self) -> u8 {
        self.survived
    }

    pub fn sex(&self) -> u8 {
        self.sex
    }

    pub fn age(&self) -> f64 {
        self.age
    }
}

/// Observations in file order with a fixed split point: rows before
/// `train_rows` are the training partition, the rest the test partition.
#[derive(Debug, Clone)]
pub struct Dataset {
    observations: Vec<Observation>,
    train_rows: usize,
}

impl Dataset {
    pub fn new(observations: Vec<Observation>, train_rows: usize) -> Result<Self> {
        if train_rows > observations.len() {
            return Err(Error::InvalidSplit {
                train_rows,
                total: observations.len(),
            });
        }

        Ok(Dataset {
            observations,
            train_rows,
        })
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn train_rows(&self) -> usize {
        self.train_rows
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn train(&self) -> &[Observation] {
        &self.observations[..self.train_rows]
    }

    pub fn test(&self) -> &[Observation] {
        &self.observations[self.train_rows..]
    }
}

/// The single predictor column placed next to the intercept in a design matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Feature {
    #[default]
    Sex,
    PassengerClass,
    Age,
}

impl Feature {
    pub fn value(self, observation: &Observation) -> f64 {
        match self {
            Feature::Sex => observation.sex() as f64,
            Feature::PassengerClass => observation.passenger_class() as f64,
            Feature::Age => observation.age(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Feature::Sex => "sex",
            Feature::PassengerClass => "passenger_class",
            Feature::Age => "age",
        }
    }
}

impl FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sex" => Ok(Feature::Sex),
            "pclass" | "passenger_class" => Ok(Feature::PassengerClass),
            "age" => Ok(Feature::Age),
            _ => Err(format!(
                "Unknown feature: {}. Expected one of: sex, pclass, age",
                s
            )),
        }
    }
}

/// Rows of `[1, feature]` paired with the survival labels.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignMatrix {
    pub features: Array2<f64>,
    pub labels: Array1<f64>,
}

impl DesignMatrix {
    pub fn from_observations(rows: &[Observation], feature: Feature) -> Self {
        let features = Array2::from_shape_fn((rows.len(), 2), |(i, j)| {
            if j == 0 {
                1.0
            } else {
                feature.value(&rows[i])
            }
        });
        let labels = rows.iter().map(|row| row.survived() as f64).collect();

        DesignMatrix { features, labels }
    }

    pub fn nrows(&self) -> usize {
        self.labels.len()
    }
}

/// A parsed passenger table.
#[derive(Debug, Clone)]
pub struct PassengerTable {
    pub heading: String,
    pub observations: Vec<Observation>,
}

/// A parsed table of numeric columns, addressed by header name.
#[derive(Debug, Clone)]
pub struct NumericTable {
    headers: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl NumericTable {
    pub fn heading(&self) -> String {
        self.headers.join(",")
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.headers
            .iter()
            .position(|header| header == name)
            .map(|idx| self.columns[idx].as_slice())
            .ok_or_else(|| Error::MissingColumn(name.to_string()))
    }
}

fn open_reader(path: &Path) -> Result<csv::Reader<BufReader<File>>> {
    let file = File::open(path).map_err(|source| Error::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(BufReader::new(file)))
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map_or(0, |pos| pos.line())
}

fn parse_number(record: &StringRecord, idx: usize, field: &'static str) -> Result<f64> {
    let raw = record.get(idx).ok_or_else(|| Error::Parse {
        line: line_of(record),
        field,
        value: String::new(),
    })?;

    raw.parse::<f64>().map_err(|_| Error::Parse {
        line: line_of(record),
        field,
        value: raw.to_string(),
    })
}

/// Parses a categorical field that must hold a small whole number.
fn parse_category(record: &StringRecord, idx: usize, field: &'static str) -> Result<u8> {
    let value = parse_number(record, idx, field)?;
    if value.fract() != 0.0 || !(0.0..=u8::MAX as f64).contains(&value) {
        return Err(Error::Parse {
            line: line_of(record),
            field,
            value: record.get(idx).unwrap_or_default().to_string(),
        });
    }
    Ok(value as u8)
}

fn parse_observation(record: &StringRecord) -> Result<Observation> {
    // column 0 is the row index and is ignored
    let passenger_class = parse_category(record, 1, "passenger_class")?;
    let survived = parse_category(record, 2, "survived")?;
    let sex = parse_category(record, 3, "sex")?;
    let age = parse_number(record, 4, "age")?;

    Observation::new(passenger_class, survived, sex, age).map_err(|err| match err {
        Error::Parse { field, value, .. } => Error::Parse {
            line: line_of(record),
            field,
            value,
        },
        other => other,
    })
}

/// Reads the passenger table at `path`, keeping at most `max_rows` rows.
pub fn load_passengers<P: AsRef<Path>>(path: P, max_rows: usize) -> Result<PassengerTable> {
    let path = path.as_ref();
    info!("Opening file {}", path.display());
    let mut reader = open_reader(path)?;

    let heading = reader.headers()?.iter().collect::<Vec<_>>().join(",");
    debug!("Heading: {}", heading);

    let mut observations = Vec::with_capacity(max_rows.min(PREALLOC_LIMIT));
    for record in reader.records() {
        let record = record?;
        if observations.len() == max_rows {
            return Err(Error::CapacityExceeded { max_rows });
        }
        observations.push(parse_observation(&record)?);
    }

    info!(
        "Closing file {} after {} observations",
        path.display(),
        observations.len()
    );

    Ok(PassengerTable {
        heading,
        observations,
    })
}

/// Reads a table whose every field is numeric.
pub fn load_numeric_table<P: AsRef<Path>>(path: P, max_rows: usize) -> Result<NumericTable> {
    let path = path.as_ref();
    info!("Opening file {}", path.display());
    let mut reader = open_reader(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut columns: Vec<Vec<f64>> = headers
        .iter()
        .map(|_| Vec::with_capacity(max_rows.min(PREALLOC_LIMIT)))
        .collect();

    let mut num_records = 0;
    for record in reader.records() {
        let record = record?;
        if num_records == max_rows {
            return Err(Error::CapacityExceeded { max_rows });
        }

        for (idx, column) in columns.iter_mut().enumerate() {
            let raw = record.get(idx).unwrap_or_default();
            let value = raw.parse::<f64>().map_err(|_| Error::Parse {
                line: line_of(&record),
                field: "numeric column",
                value: raw.to_string(),
            })?;
            column.push(value);
        }
        num_records += 1;
    }

    info!("Closing file {} after {} rows", path.display(), num_records);

    Ok(NumericTable { headers, columns })
}
