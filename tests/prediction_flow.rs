//! End-to-end checks of the submit and visualization handlers, driving the
//! controller the same way the button callbacks do.

use donorsight::config::{AppConfig, OutputFormat, ValidationMode};
use donorsight::dataset::{DonationRecord, DonationTable};
use donorsight::egui_app::controller::AppController;
use donorsight::egui_app::view_model::{
    INVALID_INPUT_MESSAGE, LIKELY_MESSAGE, UNLIKELY_MESSAGE,
};
use donorsight::ml::DonationClassifier;

fn record(recency: u32, frequency: u32, time: u32, donated: bool) -> DonationRecord {
    DonationRecord {
        recency,
        frequency,
        monetary: f64::from(frequency) * 250.0,
        time,
        donated,
    }
}

fn sample_table() -> DonationTable {
    DonationTable::from_records(vec![
        record(1, 24, 77, true),
        record(2, 20, 45, true),
        record(2, 16, 35, true),
        record(1, 12, 35, true),
        record(3, 14, 40, true),
        record(2, 50, 98, true),
        record(23, 1, 23, false),
        record(16, 2, 30, false),
        record(21, 2, 52, false),
        record(14, 1, 14, false),
        record(11, 3, 38, false),
        record(35, 1, 35, false),
    ])
    .unwrap()
}

fn controller(output_format: OutputFormat) -> AppController {
    let config = AppConfig {
        output_format,
        ..AppConfig::default()
    };
    let table = sample_table();
    let classifier = DonationClassifier::train(&table).unwrap();
    AppController::new(config, table, classifier)
}

fn fill_form(app: &mut AppController, recency: &str, frequency: &str, monetary: &str, time: &str) {
    app.ui.form.recency = recency.into();
    app.ui.form.frequency = frequency.into();
    app.ui.form.monetary = monetary.into();
    app.ui.form.time = time.into();
}

#[test]
fn valid_submit_shows_prediction_and_no_error() {
    let mut app = controller(OutputFormat::Probability);
    fill_form(&mut app, "2", "50", "12500", "98");
    app.submit_prediction();

    let message = app.ui.prediction.as_deref().unwrap();
    assert!(message.starts_with("Likelihood of donating blood: "));
    assert!(message.ends_with('%'));
    assert!(app.ui.error.is_none());
}

#[test]
fn verdict_mode_shows_exactly_one_fixed_string() {
    let mut app = controller(OutputFormat::Verdict);
    fill_form(&mut app, "2", "50", "12500", "98");
    app.submit_prediction();

    let message = app.ui.prediction.as_deref().unwrap();
    assert!(message == LIKELY_MESSAGE || message == UNLIKELY_MESSAGE);
    assert!(app.ui.error.is_none());
}

#[test]
fn negative_value_shows_fixed_error_and_no_prediction() {
    let mut app = controller(OutputFormat::Probability);
    fill_form(&mut app, "-1", "50", "12500", "98");
    app.submit_prediction();

    assert_eq!(app.ui.error.as_deref(), Some(INVALID_INPUT_MESSAGE));
    assert!(app.ui.prediction.is_none());
}

#[test]
fn non_numeric_value_uses_the_same_error_path() {
    let mut app = controller(OutputFormat::Probability);
    fill_form(&mut app, "abc", "50", "12500", "98");
    app.submit_prediction();

    assert_eq!(app.ui.error.as_deref(), Some(INVALID_INPUT_MESSAGE));
    assert!(app.ui.prediction.is_none());
}

#[test]
fn failed_submit_clears_stale_prediction() {
    let mut app = controller(OutputFormat::Probability);
    fill_form(&mut app, "2", "50", "12500", "98");
    app.submit_prediction();
    assert!(app.ui.prediction.is_some());

    fill_form(&mut app, "2", "", "12500", "98");
    app.submit_prediction();
    assert!(app.ui.prediction.is_none());
    assert_eq!(app.ui.error.as_deref(), Some(INVALID_INPUT_MESSAGE));

    fill_form(&mut app, "2", "5", "1250", "28");
    app.submit_prediction();
    assert!(app.ui.prediction.is_some());
    assert!(app.ui.error.is_none());
}

#[test]
fn digits_only_mode_rejects_fractional_monetary() {
    let config = AppConfig {
        validation_mode: ValidationMode::DigitsOnly,
        ..AppConfig::default()
    };
    let table = sample_table();
    let classifier = DonationClassifier::train(&table).unwrap();
    let mut app = AppController::new(config, table, classifier);

    fill_form(&mut app, "2", "50", "12500.5", "98");
    app.submit_prediction();
    assert_eq!(app.ui.error.as_deref(), Some(INVALID_INPUT_MESSAGE));

    fill_form(&mut app, "2", "50", "12500", "98");
    app.submit_prediction();
    assert!(app.ui.prediction.is_some());
}

#[test]
fn visualizations_render_four_charts_idempotently() {
    let mut app = controller(OutputFormat::Probability);

    app.show_visualizations();
    assert!(app.ui.charts.open);
    assert_eq!(app.ui.charts.images.len(), 4);
    let first = app.ui.charts.images.clone();
    let first_revision = app.ui.charts.revision;

    app.show_visualizations();
    assert_eq!(app.ui.charts.images.len(), 4);
    assert!(app.ui.charts.images == first);
    assert!(app.ui.charts.revision > first_revision);
}
