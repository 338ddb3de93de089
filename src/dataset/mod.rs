//! Donation dataset loading and summary statistics.

pub mod loader;
pub mod stats;

pub use loader::{DonationRecord, DonationTable, LoadError};

/// Feature column order shared by training and prediction.
pub const FEATURE_ORDER: [&str; 4] = ["Recency", "Frequency", "Monetary", "Time"];
