//! Daily health goals tracked against the latest metric sample
//!
//! Each goal pairs a category with a numeric target. Progress is refreshed from a
//! sample; a goal counts as completed once the current value reaches its target.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::GoalError;
use crate::models::MetricSample;

/// Dimension a goal tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalCategory {
    Sleep,
    Water,
    Exercise,
    Mood,
}

impl GoalCategory {
    /// Current value of this dimension in a sample
    pub fn value_of(&self, sample: &MetricSample) -> f64 {
        match self {
            GoalCategory::Sleep => sample.sleep_hours(),
            GoalCategory::Water => f64::from(sample.water_glasses()),
            GoalCategory::Exercise => f64::from(sample.exercise_minutes()),
            GoalCategory::Mood => f64::from(sample.mood()),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GoalCategory::Sleep => "Sleep",
            GoalCategory::Water => "Water Intake",
            GoalCategory::Exercise => "Exercise",
            GoalCategory::Mood => "Mood",
        }
    }
}

impl fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A per-category daily target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub category: GoalCategory,
    pub target: f64,
    pub current_value: f64,
    /// Unit label for display (hours, glasses, min)
    pub unit: String,
    pub completed: bool,
}

impl Goal {
    pub fn new(id: impl Into<String>, category: GoalCategory, target: f64, unit: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category,
            target,
            current_value: 0.0,
            unit: unit.into(),
            completed: false,
        }
    }

    /// Progress toward the target, capped at 100
    pub fn progress_percent(&self) -> f64 {
        if self.target <= 0.0 {
            return 0.0;
        }
        (self.current_value / self.target * 100.0).min(100.0)
    }

    fn refresh_completion(&mut self) {
        self.completed = self.current_value >= self.target;
    }
}

/// Goal targets, configurable through `AppConfig`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalTargets {
    /// Hours of sleep
    pub sleep: f64,
    /// Glasses of water
    pub water: f64,
    /// Minutes of exercise
    pub exercise: f64,
}

impl Default for GoalTargets {
    fn default() -> Self {
        Self {
            sleep: 8.0,
            water: 8.0,
            exercise: 30.0,
        }
    }
}

/// The set of goals shown on the goals panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthGoals {
    goals: Vec<Goal>,
}

impl Default for HealthGoals {
    fn default() -> Self {
        Self::with_targets(GoalTargets::default())
    }
}

impl HealthGoals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep, water and exercise goals with the given targets
    pub fn with_targets(targets: GoalTargets) -> Self {
        Self {
            goals: vec![
                Goal::new("sleep-goal", GoalCategory::Sleep, targets.sleep, "hours"),
                Goal::new("water-goal", GoalCategory::Water, targets.water, "glasses"),
                Goal::new("exercise-goal", GoalCategory::Exercise, targets.exercise, "min"),
            ],
        }
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn get(&self, id: &str) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    /// Refresh every goal's current value from a sample
    pub fn update_from_sample(&mut self, sample: &MetricSample) {
        for goal in &mut self.goals {
            goal.current_value = goal.category.value_of(sample);
            goal.refresh_completion();
        }
    }

    /// Change a goal's target and recompute completion
    pub fn set_target(&mut self, id: &str, target: f64) -> Result<&Goal, GoalError> {
        if !target.is_finite() || target <= 0.0 {
            return Err(GoalError::InvalidTarget {
                id: id.to_string(),
                target,
            });
        }

        let goal = self.find_mut(id)?;
        goal.target = target;
        goal.refresh_completion();
        debug!(goal = %goal.id, target, completed = goal.completed, "Goal target updated");
        Ok(goal)
    }

    /// Mark a goal as not completed
    pub fn reset(&mut self, id: &str) -> Result<(), GoalError> {
        self.find_mut(id)?.completed = false;
        Ok(())
    }

    pub fn completed_count(&self) -> usize {
        self.goals.iter().filter(|g| g.completed).count()
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Goal, GoalError> {
        self.goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| GoalError::NotFound { id: id.to_string() })
    }
}
