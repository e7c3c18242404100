//! Boundary validation for metric samples
//!
//! Scoring and recommendation generation accept any [`MetricSample`] without
//! checks. Every way of building one goes through this validator instead.

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::models::{MetricSample, RawMetricSample, DATE_FORMAT};

/// Longest plausible night, in hours
pub const MAX_SLEEP_HOURS: f64 = 24.0;

/// Upper bound on glasses of water per day
pub const MAX_WATER_GLASSES: f64 = 100.0;

/// Minutes in a day
pub const MAX_EXERCISE_MINUTES: f64 = 1440.0;

pub const MIN_MOOD: f64 = 1.0;
pub const MAX_MOOD: f64 = 5.0;

/// Validate raw metric input
pub struct SampleValidator;

impl SampleValidator {
    /// Validate every field of a raw sample and build the typed value
    pub fn validate(raw: &RawMetricSample) -> Result<MetricSample, ValidationError> {
        let date = Self::parse_date(&raw.date)?;

        Self::validate_sleep(raw.sleep)?;
        // i64 -> f64 is exact for every value that can pass the range checks
        Self::validate_water(raw.water as f64)?;
        Self::validate_exercise(raw.exercise as f64)?;
        Self::validate_mood(raw.mood as f64)?;

        MetricSample::new(
            date,
            raw.sleep,
            raw.water as u32,
            raw.exercise as u32,
            raw.mood as u8,
        )
        .map(|sample| sample.with_notes(raw.notes.clone()))
    }

    /// Parse a YYYY-MM-DD date
    pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
        NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| {
            ValidationError::MalformedDate {
                input: input.to_string(),
            }
        })
    }

    pub fn validate_sleep(hours: f64) -> Result<(), ValidationError> {
        Self::check_range("sleep", hours, 0.0, MAX_SLEEP_HOURS)
    }

    pub fn validate_water(glasses: f64) -> Result<(), ValidationError> {
        Self::check_range("water", glasses, 0.0, MAX_WATER_GLASSES)
    }

    pub fn validate_exercise(minutes: f64) -> Result<(), ValidationError> {
        Self::check_range("exercise", minutes, 0.0, MAX_EXERCISE_MINUTES)
    }

    pub fn validate_mood(mood: f64) -> Result<(), ValidationError> {
        if !mood.is_finite() {
            return Err(ValidationError::NotFinite { field: "mood" });
        }
        if !(MIN_MOOD..=MAX_MOOD).contains(&mood) {
            return Err(ValidationError::OutOfRange {
                field: "mood",
                value: mood,
                min: MIN_MOOD,
                max: MAX_MOOD,
            });
        }
        Ok(())
    }

    /// Shared check for the non-negative measures
    fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite { field });
        }
        if value < 0.0 {
            return Err(ValidationError::NegativeValue { field, value });
        }
        if value < min || value > max {
            return Err(ValidationError::OutOfRange {
                field,
                value,
                min,
                max,
            });
        }
        Ok(())
    }
}
