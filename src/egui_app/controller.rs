//! Bridges the donation dataset, classifier, and config to the egui UI.
//!
//! The controller owns the values built once at startup (loaded table,
//! trained model, settings) and exposes one handler per button. Handlers run
//! synchronously on the UI thread and only mutate [`UiState`].

use thiserror::Error;

use crate::charts::{self, ChartError};
use crate::config::{self, AppConfig, ConfigError};
use crate::dataset::{DonationTable, LoadError};
use crate::egui_app::state::{StatusBarState, StatusTone, UiState, status_badge_color};
use crate::egui_app::view_model;
use crate::ml::{DonationClassifier, TrainError};
use crate::validate;

/// Errors that prevent the application from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The settings file could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The dataset could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// The classifier could not be fitted.
    #[error(transparent)]
    Train(#[from] TrainError),
}

/// Maintains app state and serves the form's button handlers.
pub struct AppController {
    /// UI model consumed by the renderer.
    pub ui: UiState,
    config: AppConfig,
    table: DonationTable,
    classifier: DonationClassifier,
}

impl AppController {
    /// Load settings and the dataset, then train the classifier. Any failure
    /// here is fatal; the caller falls back to the launch-error window.
    pub fn bootstrap() -> Result<Self, StartupError> {
        let config = config::load_or_default()?;
        let table = DonationTable::load(&config.dataset_path)?;
        tracing::info!(
            records = table.len(),
            path = %config.dataset_path.display(),
            "dataset loaded"
        );
        let classifier = DonationClassifier::train(&table)?;
        tracing::info!("classifier trained");
        Ok(Self::new(config, table, classifier))
    }

    /// Assemble a controller from already-built startup values.
    pub fn new(config: AppConfig, table: DonationTable, classifier: DonationClassifier) -> Self {
        Self {
            ui: UiState::default(),
            config,
            table,
            classifier,
        }
    }

    /// Handler for the Predict button: validate the form, run the
    /// classifier, and overwrite both output labels.
    pub fn submit_prediction(&mut self) {
        let vector = match validate::parse_features(
            &self.ui.form.as_input(),
            self.config.validation_mode,
        ) {
            Ok(vector) => vector,
            Err(error) => {
                tracing::warn!(%error, "rejected donor form input");
                self.present_failure();
                return;
            }
        };

        match self.classifier.predict(&vector.to_array()) {
            Ok(prediction) => {
                tracing::info!(
                    probability = prediction.probability,
                    will_donate = prediction.will_donate,
                    "prediction served"
                );
                self.ui.prediction = Some(view_model::prediction_message(
                    &prediction,
                    self.config.output_format,
                ));
                self.ui.error = None;
                self.set_status("Prediction updated", StatusTone::Info);
            }
            Err(error) => {
                tracing::warn!(%error, "prediction failed");
                self.present_failure();
            }
        }
    }

    /// Handler for the Show Visualizations button: rebuild the four charts
    /// from the dataset snapshot and open the charts window.
    pub fn show_visualizations(&mut self) {
        match charts::build_all(&self.table) {
            Ok(images) => {
                let count = images.len();
                self.ui.charts.images = images;
                self.ui.charts.revision += 1;
                self.ui.charts.open = true;
                self.set_status(format!("{count} charts rendered"), StatusTone::Info);
            }
            Err(ChartError::Render(message)) => {
                tracing::error!(%message, "chart rendering failed");
                self.set_status("Failed to render charts", StatusTone::Error);
            }
        }
    }

    /// Validation and prediction failures share one visible path: the fixed
    /// error message replaces any stale prediction.
    fn present_failure(&mut self) {
        self.ui.error = Some(view_model::INVALID_INPUT_MESSAGE.to_string());
        self.ui.prediction = None;
        self.set_status("Invalid input", StatusTone::Error);
    }

    fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        let badge_label = match tone {
            StatusTone::Idle => "Idle",
            StatusTone::Info => "Ready",
            StatusTone::Error => "Error",
        };
        self.ui.status = StatusBarState {
            text: text.into(),
            badge_label: badge_label.into(),
            badge_color: status_badge_color(tone),
        };
    }
}
