//! Composite health score
//!
//! Maps one [`MetricSample`] to a 0-10 score built from four sub-scores:
//!
//! - **Sleep**: 10 inside the 7-8 hour window, otherwise a symmetric penalty of
//!   2 points per hour away from 7.5, floored at 0
//! - **Water**: linear ramp to the 8 glass target, capped at 10
//! - **Exercise**: linear ramp to the 30 minute target, capped at 10
//! - **Mood**: mood × 2, so the 1-5 scale maps onto 2-10
//!
//! The composite is the weighted sum of the sub-scores rounded to one decimal.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::MetricSample;

pub const SLEEP_WEIGHT: f64 = 0.3;
pub const WATER_WEIGHT: f64 = 0.2;
pub const EXERCISE_WEIGHT: f64 = 0.3;
pub const MOOD_WEIGHT: f64 = 0.2;

/// Ideal sleep window in hours (inclusive)
pub const IDEAL_SLEEP_MIN: f64 = 7.0;
pub const IDEAL_SLEEP_MAX: f64 = 8.0;
const SLEEP_MIDPOINT: f64 = 7.5;
const SLEEP_PENALTY_PER_HOUR: f64 = 2.0;

/// Daily water target in glasses
pub const WATER_TARGET_GLASSES: f64 = 8.0;

/// Daily exercise target in minutes
pub const EXERCISE_TARGET_MINUTES: f64 = 30.0;

pub const MAX_SCORE: f64 = 10.0;

/// Per-dimension sub-scores and the composite they produce
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub sleep: f64,
    pub water: f64,
    pub exercise: f64,
    pub mood: f64,
    /// Weighted composite, rounded to one decimal
    pub composite: f64,
}

/// Narrative band a composite score falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    /// 8.5 and above
    Excellent,
    /// 7.0 to 8.4
    Good,
    /// 5.0 to 6.9
    Fair,
    /// Below 5.0
    NeedsWork,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 8.5 => ScoreBand::Excellent,
            s if s >= 7.0 => ScoreBand::Good,
            s if s >= 5.0 => ScoreBand::Fair,
            _ => ScoreBand::NeedsWork,
        }
    }

    /// Short label for dashboards
    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent",
            ScoreBand::Good => "Good",
            ScoreBand::Fair => "Fair",
            ScoreBand::NeedsWork => "Needs work",
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Health score calculator
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Composite 0-10 health score for a sample
    pub fn compute_score(sample: &MetricSample) -> f64 {
        Self::breakdown(sample).composite
    }

    /// Sub-scores plus the composite
    pub fn breakdown(sample: &MetricSample) -> ScoreBreakdown {
        let sleep = Self::sleep_score(sample.sleep_hours());
        let water = Self::water_score(sample.water_glasses());
        let exercise = Self::exercise_score(sample.exercise_minutes());
        let mood = Self::mood_score(sample.mood());

        let weighted = sleep * SLEEP_WEIGHT
            + water * WATER_WEIGHT
            + exercise * EXERCISE_WEIGHT
            + mood * MOOD_WEIGHT;

        ScoreBreakdown {
            sleep,
            water,
            exercise,
            mood,
            composite: round_one_decimal(weighted),
        }
    }

    pub fn sleep_score(hours: f64) -> f64 {
        if (IDEAL_SLEEP_MIN..=IDEAL_SLEEP_MAX).contains(&hours) {
            MAX_SCORE
        } else {
            let penalty = (hours - SLEEP_MIDPOINT).abs() * SLEEP_PENALTY_PER_HOUR;
            MAX_SCORE - penalty.min(MAX_SCORE)
        }
    }

    pub fn water_score(glasses: u32) -> f64 {
        (f64::from(glasses) / WATER_TARGET_GLASSES * MAX_SCORE).min(MAX_SCORE)
    }

    pub fn exercise_score(minutes: u32) -> f64 {
        (f64::from(minutes) / EXERCISE_TARGET_MINUTES * MAX_SCORE).min(MAX_SCORE)
    }

    pub fn mood_score(mood: u8) -> f64 {
        f64::from(mood) * 2.0
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
