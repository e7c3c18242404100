use serde::Serialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::goals::{GoalTargets, HealthGoals};
use crate::history::MetricHistory;
use crate::models::{Category, MetricSample, Priority, RawMetricSample, Recommendation};
use crate::recommendations::RecommendationGenerator;
use crate::score::ScoreCalculator;
use crate::store::{InsertOutcome, RecommendationStore};
use crate::validation::SampleValidator;

/// What a single submission produced
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    /// Composite score of the submitted sample
    pub score: f64,
    /// Recommendations generated for the sample, before store de-duplication
    pub recommendations: Vec<Recommendation>,
    /// How many of them were new to the store
    pub stored: usize,
}

/// In-memory tracking session
///
/// Owns the metric history, the recommendation store and the goals. Nothing is
/// persisted; dropping the tracker discards the session.
#[derive(Debug, Clone, Default)]
pub struct HealthTracker {
    history: MetricHistory,
    recommendations: RecommendationStore,
    goals: HealthGoals,
}

impl HealthTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_goal_targets(targets: GoalTargets) -> Self {
        Self {
            goals: HealthGoals::with_targets(targets),
            ..Self::default()
        }
    }

    /// Seed the store with the welcome recommendation
    pub fn with_welcome(mut self) -> Self {
        self.recommendations.insert(Recommendation::new(
            Category::General,
            "Welcome to Health Tracker",
            "Start tracking your health metrics daily for personalized recommendations.",
            Priority::Medium,
        ));
        self
    }

    /// Record a sample and merge its recommendations into the store
    pub fn submit(&mut self, sample: MetricSample) -> Submission {
        let score = ScoreCalculator::compute_score(&sample);
        let recommendations = RecommendationGenerator::generate(&sample);

        let stored = self
            .recommendations
            .extend(recommendations.iter().cloned())
            .iter()
            .filter(|outcome| !matches!(outcome, InsertOutcome::Duplicate))
            .count();

        self.goals.update_from_sample(&sample);

        info!(
            date = %sample.date(),
            score,
            generated = recommendations.len(),
            stored,
            "Health metrics submitted"
        );

        self.history.push(sample);

        Submission {
            score,
            recommendations,
            stored,
        }
    }

    /// Validate raw input, then submit it
    pub fn submit_raw(&mut self, raw: &RawMetricSample) -> Result<Submission> {
        let sample = SampleValidator::validate(raw).map_err(|err| {
            warn!(error = %err, "Rejected metric sample");
            err
        })?;
        Ok(self.submit(sample))
    }

    /// Narrative summary of the latest sample
    pub fn summary(&self) -> String {
        RecommendationGenerator::summarize(self.history.as_slice())
    }

    /// Score of the latest sample, if any
    pub fn latest_score(&self) -> Option<f64> {
        self.history.latest().map(ScoreCalculator::compute_score)
    }

    pub fn history(&self) -> &MetricHistory {
        &self.history
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        self.recommendations.list()
    }

    pub fn goals(&self) -> &HealthGoals {
        &self.goals
    }

    pub fn goals_mut(&mut self) -> &mut HealthGoals {
        &mut self.goals
    }

    /// Clear the recommendation store
    pub fn reset_recommendations(&mut self) {
        self.recommendations.clear();
    }
}
