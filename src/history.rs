use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::MetricSample;
use crate::score::ScoreCalculator;

/// Number of days shown on the dashboard trend
pub const DEFAULT_TREND_DAYS: usize = 7;

/// Exercise minutes are divided by this to share the 0-10 axis
const EXERCISE_CHART_DIVISOR: f64 = 12.0;

/// One day on the dashboard trend, scaled for a shared axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    /// Hours slept
    pub sleep: f64,
    /// Glasses of water
    pub water: f64,
    /// Exercise minutes / 12
    pub exercise: f64,
    /// Mood × 2
    pub mood: f64,
    /// Composite health score
    pub score: f64,
}

impl TrendPoint {
    fn from_sample(sample: &MetricSample) -> Self {
        Self {
            date: sample.date(),
            sleep: sample.sleep_hours(),
            water: f64::from(sample.water_glasses()),
            exercise: f64::from(sample.exercise_minutes()) / EXERCISE_CHART_DIVISOR,
            mood: f64::from(sample.mood()) * 2.0,
            score: ScoreCalculator::compute_score(sample),
        }
    }
}

/// Append-only sequence of metric samples in submission order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricHistory {
    samples: Vec<MetricSample>,
}

impl MetricHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: MetricSample) {
        self.samples.push(sample);
    }

    /// Most recently submitted sample
    pub fn latest(&self) -> Option<&MetricSample> {
        self.samples.last()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricSample> {
        self.samples.iter()
    }

    pub fn as_slice(&self) -> &[MetricSample] {
        &self.samples
    }

    /// Last `n` samples, oldest first
    pub fn recent(&self, n: usize) -> &[MetricSample] {
        let start = self.samples.len().saturating_sub(n);
        &self.samples[start..]
    }

    /// Chart points for the last `n` samples
    pub fn trend(&self, n: usize) -> Vec<TrendPoint> {
        self.recent(n).iter().map(TrendPoint::from_sample).collect()
    }

    /// Mean composite score over all samples, rounded to one decimal
    pub fn average_score(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }

        let total: f64 = self.samples.iter().map(ScoreCalculator::compute_score).sum();
        let mean = total / self.samples.len() as f64;
        Some((mean * 10.0).round() / 10.0)
    }
}

impl From<Vec<MetricSample>> for MetricHistory {
    fn from(samples: Vec<MetricSample>) -> Self {
        Self { samples }
    }
}

impl<'a> IntoIterator for &'a MetricHistory {
    type Item = &'a MetricSample;
    type IntoIter = std::slice::Iter<'a, MetricSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(day: u32, exercise: u32, mood: u8) -> MetricSample {
        MetricSample::new(
            NaiveDate::from_ymd_opt(2024, 4, day).unwrap(),
            7.5,
            8,
            exercise,
            mood,
        )
        .unwrap()
    }

    #[test]
    fn test_empty_history() {
        let history = MetricHistory::new();
        assert!(history.latest().is_none());
        assert!(history.trend(7).is_empty());
        assert_eq!(history.average_score(), None);
    }

    #[test]
    fn test_latest_is_last_pushed() {
        let mut history = MetricHistory::new();
        history.push(sample(2, 30, 5));
        history.push(sample(1, 30, 4));
        // submission order wins over date order
        assert_eq!(history.latest().unwrap().date(), NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
    }

    #[test]
    fn test_recent_keeps_last_n() {
        let history: MetricHistory = (1..=10).map(|d| sample(d, 30, 4)).collect::<Vec<_>>().into();
        let recent = history.recent(7);
        assert_eq!(recent.len(), 7);
        assert_eq!(recent[0].date().format("%d").to_string(), "04");
        assert_eq!(history.recent(50).len(), 10);
    }

    #[test]
    fn test_trend_scaling() {
        let history: MetricHistory = vec![sample(1, 60, 3)].into();
        let point = &history.trend(DEFAULT_TREND_DAYS)[0];
        assert_eq!(point.exercise, 5.0);
        assert_eq!(point.mood, 6.0);
        assert_eq!(point.water, 8.0);
        assert_eq!(point.score, 9.2);
    }

    #[test]
    fn test_average_score() {
        // 10.0 and 8.4
        let history: MetricHistory = vec![sample(1, 30, 5), sample(2, 30, 1)].into();
        assert_eq!(history.average_score(), Some(9.2));
    }
}
