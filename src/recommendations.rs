//! Rule-based recommendation generation
//!
//! Each rule looks at one dimension of a [`MetricSample`] and either fires with a
//! priority or stays silent. Rules are independent: every matching rule emits a
//! recommendation, in table order. When nothing fires a single low-priority
//! "Great work!" recommendation is returned, so the result is never empty.

use tracing::debug;

use crate::models::{Category, MetricSample, Priority, Recommendation};
use crate::score::{ScoreBand, ScoreCalculator};

/// Returned by `summarize` when there is no history yet
pub const START_TRACKING_PROMPT: &str =
    "Start tracking your health metrics to get personalized AI recommendations.";

/// A predicate over a sample paired with the recommendation it produces
pub struct RecommendationRule {
    pub category: Category,
    pub title: &'static str,
    pub description: &'static str,
    /// Priority when the rule fires, `None` when it does not apply
    pub evaluate: fn(&MetricSample) -> Option<Priority>,
}

impl RecommendationRule {
    /// Build the recommendation if this rule fires for the sample
    pub fn apply(&self, sample: &MetricSample) -> Option<Recommendation> {
        (self.evaluate)(sample).map(|priority| {
            Recommendation::new(self.category, self.title, self.description, priority)
        })
    }
}

fn short_sleep(sample: &MetricSample) -> Option<Priority> {
    (sample.sleep_hours() < 6.0).then_some(Priority::High)
}

fn long_sleep(sample: &MetricSample) -> Option<Priority> {
    (sample.sleep_hours() > 9.0).then_some(Priority::Medium)
}

fn low_water(sample: &MetricSample) -> Option<Priority> {
    match sample.water_glasses() {
        w if w < 4 => Some(Priority::High),
        w if w < 6 => Some(Priority::Medium),
        _ => None,
    }
}

fn low_exercise(sample: &MetricSample) -> Option<Priority> {
    (sample.exercise_minutes() < 20).then_some(Priority::High)
}

fn low_mood(sample: &MetricSample) -> Option<Priority> {
    (sample.mood() <= 2).then_some(Priority::High)
}

/// Rule table, evaluated top to bottom
pub const RULES: &[RecommendationRule] = &[
    RecommendationRule {
        category: Category::Sleep,
        title: "Improve Sleep Duration",
        description: "You're sleeping less than 6 hours. Try to establish a consistent sleep schedule and aim for 7-8 hours.",
        evaluate: short_sleep,
    },
    RecommendationRule {
        category: Category::Sleep,
        title: "Optimize Sleep Duration",
        description: "You might be oversleeping. Aim for 7-8 hours for optimal health benefits.",
        evaluate: long_sleep,
    },
    RecommendationRule {
        category: Category::Water,
        title: "Increase Water Intake",
        description: "Try to drink at least 8 glasses of water daily for proper hydration.",
        evaluate: low_water,
    },
    RecommendationRule {
        category: Category::Exercise,
        title: "Increase Physical Activity",
        description: "Aim for at least 30 minutes of moderate exercise daily for better health.",
        evaluate: low_exercise,
    },
    RecommendationRule {
        category: Category::Mood,
        title: "Mood Enhancement Techniques",
        description: "Try meditation, deep breathing exercises, or connect with friends to improve your mood.",
        evaluate: low_mood,
    },
];

/// Recommendation generator and narrative summarizer
pub struct RecommendationGenerator;

impl RecommendationGenerator {
    /// Recommendations for one sample, never empty
    pub fn generate(sample: &MetricSample) -> Vec<Recommendation> {
        let mut recommendations: Vec<Recommendation> = RULES
            .iter()
            .filter_map(|rule| rule.apply(sample))
            .inspect(|rec| {
                debug!(
                    category = %rec.category,
                    priority = %rec.priority,
                    title = %rec.title,
                    "Recommendation rule fired"
                )
            })
            .collect();

        if recommendations.is_empty() {
            recommendations.push(Self::fallback());
        }

        recommendations
    }

    /// Positive reinforcement emitted when no rule fires
    pub fn fallback() -> Recommendation {
        Recommendation::new(
            Category::General,
            "Great work!",
            "You're on track with your health goals. Keep up the good work!",
            Priority::Low,
        )
    }

    /// Narrative for the most recent sample in `history`
    pub fn summarize(history: &[MetricSample]) -> String {
        let Some(latest) = history.last() else {
            return START_TRACKING_PROMPT.to_string();
        };

        let score = ScoreCalculator::compute_score(latest);
        Self::narrative(ScoreBand::from_score(score)).to_string()
    }

    /// Fixed message for each score band
    pub fn narrative(band: ScoreBand) -> &'static str {
        match band {
            ScoreBand::Excellent => "Your health metrics look excellent! You're maintaining a great balance of sleep, hydration, exercise, and mental wellbeing. For further optimization, consider adding variety to your exercise routine and practicing mindfulness.",
            ScoreBand::Good => "You're doing well overall! To improve further, focus on consistency in your sleep schedule and consider adding 10 more minutes to your daily exercise routine.",
            ScoreBand::Fair => "There's room for improvement in your health routine. Try setting reminders for water intake and prioritize getting 7-8 hours of sleep regularly. Even short walks can boost your exercise minutes.",
            ScoreBand::NeedsWork => "Let's work on building some healthier habits! Start small - add one glass of water daily, go to bed 15 minutes earlier, and take short walks. These small changes will make a big difference over time.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample(sleep: f64, water: u32, exercise: u32, mood: u8) -> MetricSample {
        MetricSample::new(
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            sleep,
            water,
            exercise,
            mood,
        )
        .unwrap()
    }

    fn kinds(recs: &[Recommendation]) -> Vec<(Category, Priority)> {
        recs.iter().map(|r| (r.category, r.priority)).collect()
    }

    #[test]
    fn test_poor_day_fires_four_rules() {
        let recs = RecommendationGenerator::generate(&sample(5.0, 3, 10, 2));
        assert_eq!(
            kinds(&recs),
            vec![
                (Category::Sleep, Priority::High),
                (Category::Water, Priority::High),
                (Category::Exercise, Priority::High),
                (Category::Mood, Priority::High),
            ]
        );
    }

    #[test]
    fn test_perfect_day_gets_fallback() {
        let recs = RecommendationGenerator::generate(&sample(7.5, 8, 30, 5));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].category, Category::General);
        assert_eq!(recs[0].priority, Priority::Low);
        assert_eq!(recs[0].title, "Great work!");
    }

    #[test]
    fn test_oversleeping_is_medium() {
        let recs = RecommendationGenerator::generate(&sample(10.0, 8, 30, 4));
        assert_eq!(kinds(&recs), vec![(Category::Sleep, Priority::Medium)]);
        assert_eq!(recs[0].title, "Optimize Sleep Duration");
    }

    #[test]
    fn test_water_priority_is_tiered() {
        let recs = RecommendationGenerator::generate(&sample(7.5, 4, 30, 4));
        assert_eq!(kinds(&recs), vec![(Category::Water, Priority::Medium)]);

        let recs = RecommendationGenerator::generate(&sample(7.5, 3, 30, 4));
        assert_eq!(kinds(&recs), vec![(Category::Water, Priority::High)]);

        let recs = RecommendationGenerator::generate(&sample(7.5, 6, 30, 4));
        assert_eq!(recs[0].category, Category::General);
    }

    #[test]
    fn test_rule_thresholds_are_strict() {
        // exactly 6h sleep, 20 min exercise and mood 3 do not fire
        let recs = RecommendationGenerator::generate(&sample(6.0, 8, 20, 3));
        assert_eq!(recs[0].category, Category::General);

        let recs = RecommendationGenerator::generate(&sample(9.0, 8, 30, 3));
        assert_eq!(recs[0].category, Category::General);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let recs = RecommendationGenerator::generate(&sample(5.0, 3, 10, 2));
        let again = RecommendationGenerator::generate(&sample(5.0, 3, 10, 2));
        let mut ids: Vec<_> = recs.iter().chain(again.iter()).map(|r| r.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn test_summarize_empty_history() {
        assert_eq!(RecommendationGenerator::summarize(&[]), START_TRACKING_PROMPT);
    }

    #[test]
    fn test_summarize_uses_latest_sample() {
        let history = vec![sample(7.5, 8, 30, 5), sample(5.0, 3, 10, 2)];
        let summary = RecommendationGenerator::summarize(&history);
        assert!(summary.starts_with("Let's work on building some healthier habits!"));

        let history = vec![sample(5.0, 3, 10, 2), sample(7.5, 8, 30, 5)];
        let summary = RecommendationGenerator::summarize(&history);
        assert!(summary.starts_with("Your health metrics look excellent!"));
    }

    #[test]
    fn test_summarize_middle_bands() {
        // sleep 10, water 10, exercise 5, mood 8
        let good = sample(7.5, 8, 15, 4);
        assert_eq!(ScoreCalculator::compute_score(&good), 8.1);
        assert!(RecommendationGenerator::summarize(&[good]).starts_with("You're doing well overall!"));

        let fair = sample(7.5, 4, 15, 2);
        assert_eq!(ScoreCalculator::compute_score(&fair), 6.3);
        assert!(RecommendationGenerator::summarize(&[fair]).starts_with("There's room for improvement"));
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_generate_never_empty(
            sleep in 0.0f64..=24.0,
            water in 0u32..=100,
            exercise in 0u32..=1440,
            mood in 1u8..=5
        ) {
            let recs = RecommendationGenerator::generate(&sample(sleep, water, exercise, mood));
            prop_assert!(!recs.is_empty());
            prop_assert!(recs.len() <= 4);
        }
    }
}
