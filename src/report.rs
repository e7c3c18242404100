//! Dashboard report: a serializable snapshot of a tracking session
//!
//! Rendered either as JSON or as plain-text tables for the terminal.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::fmt::Write;
use tabled::{settings::Style, Table, Tabled};

use crate::goals::Goal;
use crate::history::TrendPoint;
use crate::models::Recommendation;
use crate::score::{ScoreBand, ScoreBreakdown, ScoreCalculator};
use crate::tips::Tip;
use crate::tracker::HealthTracker;

/// Snapshot of the dashboard, recommendations and goals
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub generated_at: DateTime<Utc>,
    /// Date of the latest sample
    pub latest_date: Option<NaiveDate>,
    pub breakdown: Option<ScoreBreakdown>,
    pub band: Option<ScoreBand>,
    /// Mean composite score over the whole history
    pub average_score: Option<f64>,
    pub samples: usize,
    pub summary: String,
    pub recommendations: Vec<Recommendation>,
    pub goals: Vec<Goal>,
    pub trend: Vec<TrendPoint>,
}

#[derive(Tabled)]
struct RecommendationRow<'a> {
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Title")]
    title: &'a str,
    #[tabled(rename = "Advice")]
    description: &'a str,
}

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "Goal")]
    name: String,
    #[tabled(rename = "Current")]
    current: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Done")]
    done: &'static str,
}

#[derive(Tabled)]
struct TipRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Tip")]
    title: &'static str,
    #[tabled(rename = "Details")]
    description: &'static str,
    #[tabled(rename = "Source")]
    source: &'static str,
}

#[derive(Tabled)]
struct TrendRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Sleep (h)")]
    sleep: String,
    #[tabled(rename = "Water")]
    water: String,
    #[tabled(rename = "Exercise /12")]
    exercise: String,
    #[tabled(rename = "Mood x2")]
    mood: String,
    #[tabled(rename = "Score")]
    score: String,
}

impl HealthReport {
    /// Build a report from the tracker state, with `trend_days` days of trend
    pub fn from_tracker(tracker: &HealthTracker, trend_days: usize) -> Self {
        let history = tracker.history();
        let breakdown = history.latest().map(ScoreCalculator::breakdown);

        Self {
            generated_at: Utc::now(),
            latest_date: history.latest().map(|s| s.date()),
            breakdown,
            band: breakdown.map(|b| ScoreBand::from_score(b.composite)),
            average_score: history.average_score(),
            samples: history.len(),
            summary: tracker.summary(),
            recommendations: tracker.recommendations().to_vec(),
            goals: tracker.goals().goals().to_vec(),
            trend: history.trend(trend_days),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Plain-text rendering with one table per section
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        // writing into a String cannot fail
        let _ = writeln!(out, "HEALTH REPORT");
        let _ = writeln!(out, "Generated: {}", self.generated_at.format("%Y-%m-%d %H:%M:%S UTC"));
        let _ = writeln!(out, "Samples tracked: {}", self.samples);
        let _ = writeln!(out);

        match (&self.breakdown, &self.band, self.latest_date) {
            (Some(b), Some(band), Some(date)) => {
                let _ = writeln!(out, "Latest ({}): {:.1}/10 - {}", date, b.composite, band);
                let _ = writeln!(
                    out,
                    "  sleep {:.1}  water {:.1}  exercise {:.1}  mood {:.1}",
                    b.sleep, b.water, b.exercise, b.mood
                );
                if let Some(avg) = self.average_score {
                    let _ = writeln!(out, "  average over history: {:.1}", avg);
                }
            }
            _ => {
                let _ = writeln!(out, "No health data yet.");
            }
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.summary);
        let _ = writeln!(out);

        if !self.recommendations.is_empty() {
            let _ = writeln!(out, "RECOMMENDATIONS");
            let _ = writeln!(out, "{}", recommendation_table(&self.recommendations));
            let _ = writeln!(out);
        }

        let _ = writeln!(out, "GOALS");
        let _ = writeln!(out, "{}", goal_table(&self.goals));

        if !self.trend.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "TREND");
            let _ = writeln!(out, "{}", trend_table(&self.trend));
        }

        out
    }
}

/// Recommendations as a table, in the given order
pub fn recommendation_table(recommendations: &[Recommendation]) -> String {
    let rows = recommendations.iter().map(|r| RecommendationRow {
        priority: r.priority.to_string(),
        category: r.category.to_string(),
        title: &r.title,
        description: &r.description,
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Goals as a table with progress percentages
pub fn goal_table(goals: &[Goal]) -> String {
    let rows = goals.iter().map(|g| GoalRow {
        name: g.category.to_string(),
        current: format!("{} {}", trim_number(g.current_value), g.unit),
        target: format!("{} {}", trim_number(g.target), g.unit),
        progress: format!("{:.0}%", g.progress_percent()),
        done: if g.completed { "yes" } else { "no" },
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Tips as a table, in the given order
pub fn tip_table<'a>(tips: impl IntoIterator<Item = &'a Tip>) -> String {
    let rows = tips.into_iter().map(|tip| TipRow {
        category: tip.category.to_string(),
        title: tip.title,
        description: tip.description,
        source: tip.source.unwrap_or("-"),
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

fn trend_table(points: &[TrendPoint]) -> String {
    let rows = points.iter().map(|p| TrendRow {
        date: p.date.format("%b %d").to_string(),
        sleep: format!("{:.1}", p.sleep),
        water: format!("{:.0}", p.water),
        exercise: format!("{:.1}", p.exercise),
        mood: format!("{:.0}", p.mood),
        score: format!("{:.1}", p.score),
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Whole numbers without a trailing ".0"
fn trim_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawMetricSample;
    use crate::recommendations::START_TRACKING_PROMPT;

    fn raw(date: &str, sleep: f64, water: i64, exercise: i64, mood: i64) -> RawMetricSample {
        RawMetricSample {
            date: date.to_string(),
            sleep,
            water,
            exercise,
            mood,
            notes: String::new(),
        }
    }

    #[test]
    fn test_empty_report() {
        let report = HealthReport::from_tracker(&HealthTracker::new(), 7);
        assert!(report.breakdown.is_none());
        assert_eq!(report.summary, START_TRACKING_PROMPT);

        let text = report.render_text();
        assert!(text.contains("No health data yet."));
        assert!(text.contains("GOALS"));
        assert!(!text.contains("TREND"));
    }

    #[test]
    fn test_report_sections() {
        let mut tracker = HealthTracker::new();
        tracker.submit_raw(&raw("2024-03-01", 7.5, 8, 30, 5)).unwrap();
        tracker.submit_raw(&raw("2024-03-02", 5.0, 3, 10, 2)).unwrap();

        let report = HealthReport::from_tracker(&tracker, 7);
        assert_eq!(report.samples, 2);
        assert_eq!(report.band, Some(ScoreBand::NeedsWork));
        assert_eq!(report.trend.len(), 2);
        assert_eq!(report.recommendations.len(), 5);

        let text = report.render_text();
        assert!(text.contains("Latest (2024-03-02)"));
        assert!(text.contains("Improve Sleep Duration"));
        assert!(text.contains("Water Intake"));
        assert!(text.contains("TREND"));
    }

    #[test]
    fn test_report_json() {
        let mut tracker = HealthTracker::new();
        tracker.submit_raw(&raw("2024-03-01", 7.5, 8, 30, 5)).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&HealthReport::from_tracker(&tracker, 7).to_json().unwrap()).unwrap();
        assert_eq!(json["breakdown"]["composite"], 10.0);
        assert_eq!(json["band"], "Excellent");
        assert_eq!(json["recommendations"][0]["priority"], "low");
    }

    #[test]
    fn test_tip_table() {
        let table = tip_table(crate::tips::by_category(crate::tips::TipCategory::Water));
        assert!(table.contains("Morning Hydration"));
        assert!(table.contains("Healthline"));
        assert!(!table.contains("Start Small"));
    }

    #[test]
    fn test_trim_number() {
        assert_eq!(trim_number(8.0), "8");
        assert_eq!(trim_number(7.5), "7.5");
    }
}
