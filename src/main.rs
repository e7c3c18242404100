use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::*;
use std::path::{Path, PathBuf};

use healthrs::config::AppConfig;
use healthrs::error::ErrorSeverity;
use healthrs::import::ImportManager;
use healthrs::logging::{init_logging, LogFormat, LogLevel};
use healthrs::models::{Priority, RawMetricSample, DATE_FORMAT};
use healthrs::report::{goal_table, recommendation_table, tip_table, HealthReport};
use healthrs::tips::{self, TipCategory};
use healthrs::{
    HealthRsError, HealthTracker, MetricSample, RecommendationGenerator, SampleValidator,
    ScoreBand, ScoreCalculator,
};

/// HealthRS - Daily Health Tracking CLI
///
/// Scores a day's sleep, hydration, exercise and mood on a 0-10 scale and
/// suggests what to work on next.
#[derive(Parser)]
#[command(name = "healthrs")]
#[command(author = "HealthRS Contributors")]
#[command(version)]
#[command(about = "Daily Health Tracking CLI", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format (pretty, json, compact)
    #[arg(long, value_name = "FORMAT", global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

/// One day's metrics given on the command line
#[derive(Args)]
struct SampleArgs {
    /// Hours slept
    #[arg(short, long, allow_negative_numbers = true)]
    sleep: f64,

    /// Glasses of water
    #[arg(short, long, allow_negative_numbers = true)]
    water: i64,

    /// Minutes of exercise
    #[arg(short, long, allow_negative_numbers = true)]
    exercise: i64,

    /// Mood from 1 (low) to 5 (great)
    #[arg(short, long, allow_negative_numbers = true)]
    mood: i64,

    /// Date (YYYY-MM-DD, defaults to today)
    #[arg(short, long)]
    date: Option<String>,

    /// Free-text notes
    #[arg(short, long, default_value = "")]
    notes: String,
}

impl SampleArgs {
    fn to_sample(&self) -> healthrs::Result<MetricSample> {
        let raw = RawMetricSample {
            date: self
                .date
                .clone()
                .unwrap_or_else(|| Utc::now().date_naive().format(DATE_FORMAT).to_string()),
            sleep: self.sleep,
            water: self.water,
            exercise: self.exercise,
            mood: self.mood,
            notes: self.notes.clone(),
        };
        Ok(SampleValidator::validate(&raw)?)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the health score for one day
    Score {
        #[command(flatten)]
        sample: SampleArgs,

        /// Print the score breakdown as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate recommendations for one day
    Recommend {
        #[command(flatten)]
        sample: SampleArgs,

        /// Print recommendations as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize the most recent day of a history file
    Summarize {
        /// History file (CSV or JSON)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Full dashboard report for a history file
    Report {
        /// History file (CSV or JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// Output format
        #[arg(short = 'F', long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Number of recent days in the trend
        #[arg(short, long)]
        days: Option<usize>,
    },

    /// Show goal progress for the latest day of a history file
    Goals {
        /// History file (CSV or JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// Sleep target in hours
        #[arg(long)]
        sleep_target: Option<f64>,

        /// Water target in glasses
        #[arg(long)]
        water_target: Option<f64>,

        /// Exercise target in minutes
        #[arg(long)]
        exercise_target: Option<f64>,
    },

    /// Show health tips, optionally for one category
    Tips {
        /// sleep, water, exercise or mental
        #[arg(long)]
        category: Option<TipCategory>,
    },

    /// Manage the configuration file
    Config {
        /// Print the active configuration
        #[arg(short, long)]
        show: bool,

        /// Write a default configuration file
        #[arg(short, long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let initializing = matches!(cli.command, Commands::Config { init: true, .. });
    let config = AppConfig::resolve(cli.config.as_deref(), initializing)?;

    let mut log_config = config.logging.clone();
    log_config.level = LogLevel::from_verbosity(log_config.level, cli.verbose);
    if let Some(format) = cli.log_format {
        log_config.format = format;
    }
    init_logging(&log_config)?;

    if !config.display.color {
        colored::control::set_override(false);
    }

    if let Err(err) = run(cli.command, cli.config.as_deref(), &config) {
        if let Some(health_err) = err.downcast_ref::<HealthRsError>() {
            match health_err.severity() {
                ErrorSeverity::Warning => tracing::warn!(error = %health_err, "Command rejected"),
                ErrorSeverity::Error => tracing::error!(error = %health_err, "Command failed"),
            }
            eprintln!("{} {}", "✗".red().bold(), health_err.user_message().red());
            std::process::exit(1);
        }
        return Err(err);
    }

    Ok(())
}

fn run(command: Commands, config_path: Option<&Path>, config: &AppConfig) -> Result<()> {
    match command {
        Commands::Score { sample, json } => {
            let sample = sample.to_sample()?;
            let breakdown = ScoreCalculator::breakdown(&sample);

            if json {
                println!("{}", serde_json::to_string_pretty(&breakdown)?);
            } else {
                let band = ScoreBand::from_score(breakdown.composite);
                println!(
                    "{} {}",
                    "Health score:".bold(),
                    colorize_score(breakdown.composite, band)
                );
                println!("  Sleep:    {:.1}", breakdown.sleep);
                println!("  Water:    {:.1}", breakdown.water);
                println!("  Exercise: {:.1}", breakdown.exercise);
                println!("  Mood:     {:.1}", breakdown.mood);
            }
        }

        Commands::Recommend { sample, json } => {
            let sample = sample.to_sample()?;
            let recommendations = RecommendationGenerator::generate(&sample);

            if json {
                println!("{}", serde_json::to_string_pretty(&recommendations)?);
            } else {
                println!("{}", "Recommendations".cyan().bold());
                println!("{}", recommendation_table(&recommendations));
                let urgent = recommendations
                    .iter()
                    .filter(|r| r.priority == Priority::High)
                    .count();
                if urgent > 0 {
                    println!("{}", format!("{} high priority", urgent).red());
                }
            }
        }

        Commands::Summarize { file } => {
            let tracker = load_tracker(&file, config)?;
            println!("{}", tracker.summary());
        }

        Commands::Report { file, format, days } => {
            let tracker = load_tracker(&file, config)?;
            let report = HealthReport::from_tracker(
                &tracker,
                days.unwrap_or(config.display.trend_days).max(1),
            );

            match format {
                OutputFormat::Json => println!("{}", report.to_json()?),
                OutputFormat::Table => print!("{}", report.render_text()),
            }
        }

        Commands::Goals {
            file,
            sleep_target,
            water_target,
            exercise_target,
        } => {
            let mut tracker = load_tracker(&file, config)?;
            let overrides = [
                ("sleep-goal", sleep_target),
                ("water-goal", water_target),
                ("exercise-goal", exercise_target),
            ];
            for (id, target) in overrides {
                if let Some(target) = target {
                    tracker
                        .goals_mut()
                        .set_target(id, target)
                        .map_err(HealthRsError::from)?;
                }
            }

            println!("{}", "Health Goals".green().bold());
            println!("{}", goal_table(tracker.goals().goals()));
            println!(
                "{} of {} goals met",
                tracker.goals().completed_count(),
                tracker.goals().goals().len()
            );
        }

        Commands::Tips { category } => {
            let featured = tips::tip_of_the_day(Utc::now().date_naive());
            println!("{} {}", "Tip of the day:".yellow().bold(), featured.title.bold());
            println!("  {}", featured.description);
            if let Some(source) = featured.source {
                println!("  {}", format!("Source: {}", source).dimmed());
            }
            println!();

            match category {
                Some(category) => println!("{}", tip_table(tips::by_category(category))),
                None => println!("{}", tip_table(tips::TIPS)),
            }
        }

        Commands::Config { show, init } => {
            let path = config_path
                .map(Path::to_path_buf)
                .unwrap_or_else(AppConfig::default_config_path);

            if init {
                let mut fresh = config.clone();
                fresh.save_to_file(&path)?;
                println!("{} {}", "✓ Wrote".green(), path.display());
            }
            if show || !init {
                println!("{}", format!("# {}", path.display()).dimmed());
                println!(
                    "{}",
                    toml::to_string_pretty(config).context("Failed to render configuration")?
                );
            }
        }
    }

    Ok(())
}

/// Replay a history file through a fresh tracker
fn load_tracker(file: &Path, config: &AppConfig) -> Result<HealthTracker> {
    let samples = ImportManager::new().import_file(file)?;

    let mut tracker = HealthTracker::with_goal_targets(config.goals);
    if config.display.show_welcome {
        tracker = tracker.with_welcome();
    }

    for sample in samples {
        tracker.submit(sample);
    }
    Ok(tracker)
}

fn colorize_score(score: f64, band: ScoreBand) -> ColoredString {
    let text = format!("{:.1}/10 ({})", score, band);
    match band {
        ScoreBand::Excellent => text.green().bold(),
        ScoreBand::Good => text.green(),
        ScoreBand::Fair => text.yellow(),
        ScoreBand::NeedsWork => text.red(),
    }
}
