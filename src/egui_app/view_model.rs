//! Helpers to convert prediction outcomes into user-facing text.

use crate::config::OutputFormat;
use crate::ml::Prediction;

/// Fixed message shown for every rejected or failed submit.
pub const INVALID_INPUT_MESSAGE: &str = "Please enter valid inputs";

/// Fixed verdict shown for donors above the decision threshold.
pub const LIKELY_MESSAGE: &str = "This donor is likely to donate again.";

/// Fixed verdict shown for donors below the decision threshold.
pub const UNLIKELY_MESSAGE: &str = "This donor is unlikely to donate again.";

/// Render a prediction using the configured wording. The format is fixed for
/// the lifetime of the session.
pub fn prediction_message(prediction: &Prediction, format: OutputFormat) -> String {
    match format {
        OutputFormat::Probability => format!(
            "Likelihood of donating blood: {:.2}%",
            prediction.probability * 100.0
        ),
        OutputFormat::Verdict => {
            let verdict = if prediction.will_donate {
                LIKELY_MESSAGE
            } else {
                UNLIKELY_MESSAGE
            };
            verdict.to_string()
        }
    }
}
