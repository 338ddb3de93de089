//! Donation-likelihood classifier.
//!
//! A binary logistic regression fitted once over the whole table at startup.
//! Construction is training, so an untrained classifier cannot exist and
//! every prediction runs against the fitted model. Fitting involves no
//! randomness; training twice on the same table yields identical predictions.

use linfa::prelude::*;
use linfa_logistic::{FittedLogisticRegression, LogisticRegression};
use ndarray::Array2;
use thiserror::Error;

use crate::dataset::{DonationTable, FEATURE_ORDER};

/// Iteration cap for the logistic regression solver.
const MAX_ITERATIONS: u64 = 200;

/// Probability at or above which a donor is called likely to donate.
pub const LIKELY_THRESHOLD: f64 = 0.5;

/// Errors that may occur while fitting the classifier.
#[derive(Debug, Error)]
pub enum TrainError {
    /// The solver rejected the training data.
    #[error("Failed to fit the donation classifier: {0}")]
    Fit(#[from] linfa_logistic::error::Error),
}

/// Errors that may occur while serving a prediction.
#[derive(Debug, Error)]
pub enum PredictionError {
    /// The feature vector width does not match the trained feature set.
    #[error("Expected {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },
    /// A feature value was NaN or infinite.
    #[error("Feature values must be finite")]
    NonFinite,
}

/// Outcome of a single prediction request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Class at the [`LIKELY_THRESHOLD`] decision boundary.
    pub will_donate: bool,
    /// Probability that the donor gives blood in the reference period.
    pub probability: f64,
}

/// Logistic regression over the four donor features.
pub struct DonationClassifier {
    model: FittedLogisticRegression<f64, usize>,
}

impl DonationClassifier {
    /// Fit the classifier on the whole table. No train/test split is taken;
    /// the model exists to serve the form, not to report accuracy.
    pub fn train(table: &DonationTable) -> Result<Self, TrainError> {
        let dataset = Dataset::new(table.feature_matrix(), table.outcome_labels())
            .with_feature_names(FEATURE_ORDER.to_vec());
        let model = LogisticRegression::default()
            .max_iterations(MAX_ITERATIONS)
            .fit(&dataset)?;
        tracing::debug!(records = table.len(), "classifier fitted");
        Ok(Self { model })
    }

    /// Predict the donation likelihood for one feature vector, which must
    /// use the training-time feature order.
    pub fn predict(&self, features: &[f64]) -> Result<Prediction, PredictionError> {
        if features.len() != FEATURE_ORDER.len() {
            return Err(PredictionError::FeatureCount {
                expected: FEATURE_ORDER.len(),
                actual: features.len(),
            });
        }
        if features.iter().any(|value| !value.is_finite()) {
            return Err(PredictionError::NonFinite);
        }
        let row = Array2::from_shape_vec((1, features.len()), features.to_vec())
            .expect("row shape matches feature count");
        let probability = self.model.predict_probabilities(&row)[0];
        let class = self.model.predict(&row)[0];
        Ok(Prediction {
            will_donate: class == 1,
            probability,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DonationRecord;

    fn record(recency: u32, frequency: u32, time: u32, donated: bool) -> DonationRecord {
        DonationRecord {
            recency,
            frequency,
            monetary: f64::from(frequency) * 250.0,
            time,
            donated,
        }
    }

    fn training_table() -> DonationTable {
        // Frequent recent donors gave again; lapsed one-off donors did not.
        DonationTable::from_records(vec![
            record(1, 24, 77, true),
            record(2, 20, 45, true),
            record(2, 16, 35, true),
            record(1, 12, 35, true),
            record(3, 14, 40, true),
            record(23, 1, 23, false),
            record(16, 2, 30, false),
            record(21, 2, 52, false),
            record(14, 1, 14, false),
            record(11, 3, 38, false),
        ])
        .unwrap()
    }

    #[test]
    fn separable_donors_get_confident_predictions() {
        let classifier = DonationClassifier::train(&training_table()).unwrap();

        let frequent = classifier.predict(&[1.0, 22.0, 5500.0, 60.0]).unwrap();
        assert!(frequent.will_donate);
        assert!(frequent.probability > LIKELY_THRESHOLD);

        let lapsed = classifier.predict(&[20.0, 1.0, 250.0, 20.0]).unwrap();
        assert!(!lapsed.will_donate);
        assert!(lapsed.probability < LIKELY_THRESHOLD);
    }

    #[test]
    fn training_twice_is_deterministic() {
        let table = training_table();
        let first = DonationClassifier::train(&table).unwrap();
        let second = DonationClassifier::train(&table).unwrap();

        for features in [
            [2.0, 50.0, 12500.0, 98.0],
            [0.0, 0.0, 0.0, 0.0],
            [10.0, 5.0, 1250.0, 30.0],
        ] {
            let a = first.predict(&features).unwrap();
            let b = second.predict(&features).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn wrong_cardinality_is_rejected() {
        let classifier = DonationClassifier::train(&training_table()).unwrap();
        let error = classifier.predict(&[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(
            error,
            PredictionError::FeatureCount {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn non_finite_features_are_rejected() {
        let classifier = DonationClassifier::train(&training_table()).unwrap();
        let error = classifier
            .predict(&[f64::NAN, 2.0, 3.0, 4.0])
            .unwrap_err();
        assert!(matches!(error, PredictionError::NonFinite));
    }
}
