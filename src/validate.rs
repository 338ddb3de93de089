//! Donor form input validation.
//!
//! Raw text from the four entry fields either becomes a [`FeatureVector`] in
//! the fixed training order or a [`ValidationError`]; no partial vector is
//! ever produced. Presence is checked for every field before any parsing so
//! the first missing field wins over a later malformed one.

use thiserror::Error;

use crate::config::ValidationMode;

/// The four donor attribute fields, in training order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Months since the most recent donation.
    Recency,
    /// Number of prior donations.
    Frequency,
    /// Cumulative amount donated.
    Monetary,
    /// Months since the first donation.
    Time,
}

impl Field {
    /// Label shown next to the entry field.
    pub fn label(self) -> &'static str {
        match self {
            Field::Recency => "Recency (months)",
            Field::Frequency => "Frequency of donations",
            Field::Monetary => "Monetary (c.c. blood)",
            Field::Time => "Time (months)",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Field::Recency => "Recency",
            Field::Frequency => "Frequency",
            Field::Monetary => "Monetary",
            Field::Time => "Time",
        };
        f.write_str(name)
    }
}

/// Why a submitted form was rejected. Suppresses prediction entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The field was empty or whitespace.
    #[error("{0} is required")]
    Missing(Field),
    /// The field did not parse as a number.
    #[error("{0} must be a number")]
    NonNumeric(Field),
    /// The field parsed as a negative number.
    #[error("{0} must not be negative")]
    Negative(Field),
    /// A whole number was required but a fraction was given.
    #[error("{0} must be a whole number")]
    NonInteger(Field),
}

/// The four numeric predictors in training order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    /// Months since the most recent donation.
    pub recency: f64,
    /// Number of prior donations.
    pub frequency: f64,
    /// Cumulative amount donated.
    pub monetary: f64,
    /// Months since the first donation.
    pub time: f64,
}

impl FeatureVector {
    /// Values in the order used at training time.
    pub fn to_array(self) -> [f64; 4] {
        [self.recency, self.frequency, self.monetary, self.time]
    }
}

/// Raw text currently held by the donor form.
#[derive(Debug, Clone, Copy)]
pub struct RawDonorInput<'a> {
    /// Text of the recency field.
    pub recency: &'a str,
    /// Text of the frequency field.
    pub frequency: &'a str,
    /// Text of the monetary field.
    pub monetary: &'a str,
    /// Text of the time field.
    pub time: &'a str,
}

impl<'a> RawDonorInput<'a> {
    fn fields(&self) -> [(Field, &'a str); 4] {
        [
            (Field::Recency, self.recency),
            (Field::Frequency, self.frequency),
            (Field::Monetary, self.monetary),
            (Field::Time, self.time),
        ]
    }
}

/// Parse the raw form input into a feature vector, or reject it.
pub fn parse_features(
    input: &RawDonorInput<'_>,
    mode: ValidationMode,
) -> Result<FeatureVector, ValidationError> {
    let fields = input.fields();
    for (field, text) in fields {
        if text.trim().is_empty() {
            return Err(ValidationError::Missing(field));
        }
    }

    let mut values = [0.0f64; 4];
    for (slot, (field, text)) in values.iter_mut().zip(fields) {
        *slot = parse_field(text.trim(), field, mode)?;
    }
    let [recency, frequency, monetary, time] = values;
    Ok(FeatureVector {
        recency,
        frequency,
        monetary,
        time,
    })
}

fn parse_field(text: &str, field: Field, mode: ValidationMode) -> Result<f64, ValidationError> {
    match mode {
        ValidationMode::DigitsOnly => parse_digits(text, field),
        ValidationMode::Numeric => parse_numeric(text, field),
    }
}

fn parse_digits(text: &str, field: Field) -> Result<f64, ValidationError> {
    if text.chars().all(|c| c.is_ascii_digit()) {
        return text
            .parse::<f64>()
            .map_err(|_| ValidationError::NonNumeric(field));
    }
    if let Some(rest) = text.strip_prefix('-') {
        if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::Negative(field));
        }
    }
    Err(ValidationError::NonNumeric(field))
}

fn parse_numeric(text: &str, field: Field) -> Result<f64, ValidationError> {
    let value: f64 = text
        .parse()
        .map_err(|_| ValidationError::NonNumeric(field))?;
    if !value.is_finite() {
        return Err(ValidationError::NonNumeric(field));
    }
    if value < 0.0 {
        return Err(ValidationError::Negative(field));
    }
    // Monetary may carry a fraction; the month/count fields may not.
    if field != Field::Monetary && value.fract() != 0.0 {
        return Err(ValidationError::NonInteger(field));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input<'a>(
        recency: &'a str,
        frequency: &'a str,
        monetary: &'a str,
        time: &'a str,
    ) -> RawDonorInput<'a> {
        RawDonorInput {
            recency,
            frequency,
            monetary,
            time,
        }
    }

    #[test]
    fn accepts_well_formed_input_in_training_order() {
        let vector =
            parse_features(&input("2", "50", "12500", "98"), ValidationMode::Numeric).unwrap();
        assert_eq!(vector.to_array(), [2.0, 50.0, 12500.0, 98.0]);
    }

    #[test]
    fn zero_is_valid_and_distinct_from_missing() {
        let vector =
            parse_features(&input("0", "0", "0", "0"), ValidationMode::Numeric).unwrap();
        assert_eq!(vector.to_array(), [0.0; 4]);
    }

    #[test]
    fn missing_field_is_reported_before_malformed_later_field() {
        let error =
            parse_features(&input("abc", " ", "1", "1"), ValidationMode::Numeric).unwrap_err();
        assert_eq!(error, ValidationError::Missing(Field::Frequency));
    }

    #[test]
    fn non_numeric_field_is_rejected() {
        let error =
            parse_features(&input("abc", "50", "12500", "98"), ValidationMode::Numeric)
                .unwrap_err();
        assert_eq!(error, ValidationError::NonNumeric(Field::Recency));
    }

    #[test]
    fn negative_field_is_rejected_as_negative() {
        for mode in [ValidationMode::Numeric, ValidationMode::DigitsOnly] {
            let error = parse_features(&input("-1", "50", "12500", "98"), mode).unwrap_err();
            assert_eq!(error, ValidationError::Negative(Field::Recency));
        }
    }

    #[test]
    fn numeric_mode_allows_fractional_monetary_only() {
        let vector =
            parse_features(&input("2", "50", "12500.5", "98"), ValidationMode::Numeric).unwrap();
        assert_eq!(vector.monetary, 12500.5);

        let error =
            parse_features(&input("2.5", "50", "12500", "98"), ValidationMode::Numeric)
                .unwrap_err();
        assert_eq!(error, ValidationError::NonInteger(Field::Recency));
    }

    #[test]
    fn digits_only_mode_rejects_fractions_everywhere() {
        let error = parse_features(
            &input("2", "50", "12500.5", "98"),
            ValidationMode::DigitsOnly,
        )
        .unwrap_err();
        assert_eq!(error, ValidationError::NonNumeric(Field::Monetary));
    }

    #[test]
    fn non_finite_text_is_not_numeric() {
        for text in ["inf", "NaN", "-inf"] {
            let error = parse_features(&input(text, "1", "1", "1"), ValidationMode::Numeric)
                .unwrap_err();
            assert!(matches!(
                error,
                ValidationError::NonNumeric(Field::Recency) | ValidationError::Negative(_)
            ));
        }
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let vector =
            parse_features(&input(" 2 ", "50", " 12500", "98 "), ValidationMode::Numeric).unwrap();
        assert_eq!(vector.to_array(), [2.0, 50.0, 12500.0, 98.0]);
    }
}
