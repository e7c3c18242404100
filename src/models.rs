use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::validation::SampleValidator;

/// Date format used for samples on every input and output surface
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One day's recorded health measurements
///
/// Fields are private: a sample can only be built through [`MetricSample::new`]
/// or deserialization, both of which validate, and it is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMetricSample", into = "RawMetricSample")]
pub struct MetricSample {
    date: NaiveDate,
    sleep_hours: f64,
    water_glasses: u32,
    exercise_minutes: u32,
    mood: u8,
    notes: String,
}

impl MetricSample {
    /// Build a validated sample with empty notes
    pub fn new(
        date: NaiveDate,
        sleep_hours: f64,
        water_glasses: u32,
        exercise_minutes: u32,
        mood: u8,
    ) -> Result<Self, ValidationError> {
        SampleValidator::validate_sleep(sleep_hours)?;
        SampleValidator::validate_water(f64::from(water_glasses))?;
        SampleValidator::validate_exercise(f64::from(exercise_minutes))?;
        SampleValidator::validate_mood(f64::from(mood))?;

        Ok(Self {
            date,
            sleep_hours,
            water_glasses,
            exercise_minutes,
            mood,
            notes: String::new(),
        })
    }

    /// Copy of this sample carrying the given notes
    pub fn with_notes(self, notes: impl Into<String>) -> Self {
        Self {
            notes: notes.into(),
            ..self
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Hours slept
    pub fn sleep_hours(&self) -> f64 {
        self.sleep_hours
    }

    /// Glasses of water drunk
    pub fn water_glasses(&self) -> u32 {
        self.water_glasses
    }

    /// Minutes of exercise
    pub fn exercise_minutes(&self) -> u32 {
        self.exercise_minutes
    }

    /// Self-reported mood, 1 (low) to 5 (great)
    pub fn mood(&self) -> u8 {
        self.mood
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }
}

/// Unvalidated sample as supplied by a form, file or command line
///
/// Numeric fields are signed and the date is text so that out-of-range values
/// reach the validator instead of failing inside the parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMetricSample {
    pub date: String,
    #[serde(alias = "sleepHours", alias = "sleep_hours")]
    pub sleep: f64,
    #[serde(alias = "waterGlasses", alias = "water_glasses")]
    pub water: i64,
    #[serde(alias = "exerciseMinutes", alias = "exercise_minutes")]
    pub exercise: i64,
    pub mood: i64,
    #[serde(default)]
    pub notes: String,
}

impl TryFrom<RawMetricSample> for MetricSample {
    type Error = ValidationError;

    fn try_from(raw: RawMetricSample) -> Result<Self, Self::Error> {
        SampleValidator::validate(&raw)
    }
}

impl From<MetricSample> for RawMetricSample {
    fn from(sample: MetricSample) -> Self {
        Self {
            date: sample.date.format(DATE_FORMAT).to_string(),
            sleep: sample.sleep_hours,
            water: i64::from(sample.water_glasses),
            exercise: i64::from(sample.exercise_minutes),
            mood: i64::from(sample.mood),
            notes: sample.notes,
        }
    }
}

/// Health dimension a recommendation addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Sleep,
    Water,
    Exercise,
    Mood,
    General,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Sleep => write!(f, "sleep"),
            Category::Water => write!(f, "water"),
            Category::Exercise => write!(f, "exercise"),
            Category::Mood => write!(f, "mood"),
            Category::General => write!(f, "general"),
        }
    }
}

/// Urgency of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

/// Categorized, prioritized advisory message derived from one sample
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Opaque unique token, no meaning beyond identity
    pub id: String,
    pub category: Category,
    /// Short label, also the de-duplication key in the store
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

impl Recommendation {
    /// Create a recommendation with a freshly generated id
    pub fn new(
        category: Category,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            category,
            title: title.into(),
            description: description.into(),
            priority,
        }
    }
}
