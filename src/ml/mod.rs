//! Machine-learning helpers for donation prediction.

pub mod classifier;

pub use classifier::{DonationClassifier, Prediction, PredictionError, TrainError};
