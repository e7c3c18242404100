// Library interface for HealthRS modules
// This allows integration tests and the CLI to share the engine

pub mod config;
pub mod error;
pub mod goals;
pub mod history;
pub mod import;
pub mod logging;
pub mod models;
pub mod recommendations;
pub mod report;
pub mod score;
pub mod store;
pub mod tips;
pub mod tracker;
pub mod validation;

// Re-export commonly used types for convenience
pub use models::*;
pub use score::{ScoreBand, ScoreBreakdown, ScoreCalculator};
pub use recommendations::{RecommendationGenerator, RecommendationRule};
pub use store::{InsertOutcome, RecommendationStore};
pub use history::{MetricHistory, TrendPoint};
pub use goals::{Goal, GoalCategory, GoalTargets, HealthGoals};
pub use tracker::{HealthTracker, Submission};
pub use validation::SampleValidator;
pub use report::HealthReport;
pub use tips::{Tip, TipCategory};
pub use error::{HealthRsError, Result};
pub use logging::{LogConfig, LogLevel, LogFormat};
