//! Loader for the blood-donation dataset.
//!
//! The input is a comma-delimited file with a header row using the original
//! verbose column names. Columns are renamed to the short labels in
//! [`crate::dataset::FEATURE_ORDER`] (plus `Donated`) at deserialization.
//! Any load failure is fatal at startup; there is no recovery path.

use std::fs::File;
use std::path::{Path, PathBuf};

use ndarray::{Array1, Array2};
use serde::Deserialize;
use thiserror::Error;

use super::FEATURE_ORDER;

/// Verbose column headers expected in the input file, in file order.
pub const EXPECTED_HEADERS: [&str; 5] = [
    "Recency (months)",
    "Frequency (times)",
    "Monetary (c.c. blood)",
    "Time (months)",
    "whether he/she donated blood in March 2007",
];

/// Errors that may occur while loading the dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The dataset file could not be opened.
    #[error("Failed to open dataset {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The header row could not be read.
    #[error("Failed to read dataset header: {0}")]
    Header(csv::Error),
    /// A required column is absent from the header row.
    #[error("Dataset is missing expected column \"{column}\"")]
    MissingColumn { column: &'static str },
    /// A data row failed to parse.
    #[error("Malformed dataset row {row}: {source}")]
    Row { row: usize, source: csv::Error },
    /// The outcome column holds something other than 0 or 1.
    #[error("Dataset row {row} has outcome {value}; expected 0 or 1")]
    InvalidOutcome { row: usize, value: u8 },
    /// The file parsed but contained no records.
    #[error("Dataset contains no records")]
    Empty,
    /// Every record shares one outcome; a classifier cannot be trained.
    #[error("Dataset outcome column has fewer than two classes")]
    SingleClass,
}

/// One donor's history and outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DonationRecord {
    /// Months since the most recent donation.
    pub recency: u32,
    /// Number of prior donations.
    pub frequency: u32,
    /// Cumulative amount donated, in c.c. of blood.
    pub monetary: f64,
    /// Months since the first donation.
    pub time: u32,
    /// Whether the donor gave blood in the reference period.
    pub donated: bool,
}

impl DonationRecord {
    /// Feature values in [`FEATURE_ORDER`].
    pub fn feature_row(&self) -> [f64; 4] {
        [
            f64::from(self.recency),
            f64::from(self.frequency),
            self.monetary,
            f64::from(self.time),
        ]
    }
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Recency (months)")]
    recency: u32,
    #[serde(rename = "Frequency (times)")]
    frequency: u32,
    #[serde(rename = "Monetary (c.c. blood)")]
    monetary: f64,
    #[serde(rename = "Time (months)")]
    time: u32,
    #[serde(rename = "whether he/she donated blood in March 2007")]
    donated: u8,
}

/// The full donation dataset, immutable once loaded.
#[derive(Debug, Clone)]
pub struct DonationTable {
    records: Vec<DonationRecord>,
}

impl DonationTable {
    /// Load and validate the dataset from a delimited file.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(file);

        let headers = reader.headers().map_err(LoadError::Header)?.clone();
        for column in EXPECTED_HEADERS {
            if !headers.iter().any(|header| header == column) {
                return Err(LoadError::MissingColumn { column });
            }
        }

        let mut records = Vec::new();
        for (idx, row) in reader.deserialize::<RawRecord>().enumerate() {
            // 1-based file position, counting the header row.
            let row_number = idx + 2;
            let raw = row.map_err(|source| LoadError::Row {
                row: row_number,
                source,
            })?;
            let donated = match raw.donated {
                0 => false,
                1 => true,
                value => {
                    return Err(LoadError::InvalidOutcome {
                        row: row_number,
                        value,
                    });
                }
            };
            records.push(DonationRecord {
                recency: raw.recency,
                frequency: raw.frequency,
                monetary: raw.monetary,
                time: raw.time,
                donated,
            });
        }
        Self::from_records(records)
    }

    /// Build a table from in-memory records, applying the same guards as
    /// [`DonationTable::load`].
    pub fn from_records(records: Vec<DonationRecord>) -> Result<Self, LoadError> {
        if records.is_empty() {
            return Err(LoadError::Empty);
        }
        let first = records[0].donated;
        if records.iter().all(|record| record.donated == first) {
            return Err(LoadError::SingleClass);
        }
        Ok(Self { records })
    }

    /// Number of donor records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; construction rejects empty tables.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Borrow the loaded records.
    pub fn records(&self) -> &[DonationRecord] {
        &self.records
    }

    /// Feature matrix with one row per record, columns in [`FEATURE_ORDER`].
    pub fn feature_matrix(&self) -> Array2<f64> {
        let mut data = Vec::with_capacity(self.records.len() * FEATURE_ORDER.len());
        for record in &self.records {
            data.extend_from_slice(&record.feature_row());
        }
        Array2::from_shape_vec((self.records.len(), FEATURE_ORDER.len()), data)
            .expect("row count and feature count match the data length")
    }

    /// Outcome labels aligned with [`DonationTable::feature_matrix`] rows.
    pub fn outcome_labels(&self) -> Array1<usize> {
        self.records
            .iter()
            .map(|record| usize::from(record.donated))
            .collect()
    }
}
