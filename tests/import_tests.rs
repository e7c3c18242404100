use healthrs::config::AppConfig;
use healthrs::error::{HealthRsError, ImportError, ValidationError};
use healthrs::import::ImportManager;
use healthrs::report::HealthReport;
use healthrs::HealthTracker;
use std::fs;
use tempfile::tempdir;

/// File import, reporting and configuration through the public API

#[cfg(test)]
mod import_tests {
    use super::*;

    const CSV_HISTORY: &str = "\
date,sleep_hours,water_glasses,exercise_minutes,mood,notes
2024-03-01,7.5,8,30,5,great day
2024-03-02,5,3,10,2,
2024-03-03,8,6,25,4,walked to work
";

    const JSON_HISTORY: &str = r#"[
        {"date": "2024-03-01", "sleepHours": 7.5, "waterGlasses": 8, "exerciseMinutes": 30, "mood": 5},
        {"date": "2024-03-02", "sleep": 6.5, "water": 5, "exercise": 20, "mood": 3, "notes": "busy"}
    ]"#;

    #[test]
    fn test_csv_history_import() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.csv");
        fs::write(&path, CSV_HISTORY).unwrap();

        let history = ImportManager::new().import_history(&path).unwrap();

        assert_eq!(history.len(), 3);
        let first = &history.as_slice()[0];
        assert_eq!(first.notes(), "great day");
        assert_eq!(first.water_glasses(), 8);
        assert_eq!(history.latest().unwrap().exercise_minutes(), 25);
    }

    #[test]
    fn test_json_history_import() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, JSON_HISTORY).unwrap();

        let samples = ImportManager::new().import_file(&path).unwrap();

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].sleep_hours(), 7.5);
        assert_eq!(samples[1].notes(), "busy");
    }

    #[test]
    fn test_csv_invalid_row_is_reported_by_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.csv");
        fs::write(
            &path,
            "date,sleep,water,exercise,mood\n2024-03-01,7,8,30,4\n2024-03-02,7,8,-5,4\n",
        )
        .unwrap();

        let err = ImportManager::new().import_file(&path).unwrap_err();
        match err {
            HealthRsError::Import(ImportError::InvalidRow { row, source }) => {
                assert_eq!(row, 3);
                assert!(matches!(source, ValidationError::NegativeValue { field: "exercise", .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_json_bad_date_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(
            &path,
            r#"[{"date": "03/01/2024", "sleep": 7, "water": 8, "exercise": 30, "mood": 4}]"#,
        )
        .unwrap();

        let err = ImportManager::new().import_file(&path).unwrap_err();
        assert!(matches!(
            err,
            HealthRsError::Import(ImportError::InvalidRow {
                row: 1,
                source: ValidationError::MalformedDate { .. }
            })
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.xlsx");
        fs::write(&path, "irrelevant").unwrap();

        let err = ImportManager::new().import_file(&path).unwrap_err();
        assert!(matches!(err, HealthRsError::Import(ImportError::UnsupportedFormat { .. })));
        assert!(err.user_message().contains("CSV and JSON"));
    }

    #[test]
    fn test_imported_history_report() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.csv");
        fs::write(&path, CSV_HISTORY).unwrap();

        let mut tracker = HealthTracker::new();
        for sample in ImportManager::new().import_file(&path).unwrap() {
            tracker.submit(sample);
        }

        let report = HealthReport::from_tracker(&tracker, 2);
        assert_eq!(report.samples, 3);
        assert_eq!(report.trend.len(), 2);
        assert_eq!(report.latest_date.unwrap().to_string(), "2024-03-03");

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["samples"], 3);
        assert!(report.render_text().contains("RECOMMENDATIONS"));
    }

    #[test]
    fn test_config_round_trip_drives_goals() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = AppConfig::default();
        config.goals.water = 10.0;
        config.display.trend_days = 14;
        config.save_to_file(&path).unwrap();

        let loaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.goals.water, 10.0);
        assert_eq!(loaded.display.trend_days, 14);

        let tracker = HealthTracker::with_goal_targets(loaded.goals);
        assert_eq!(tracker.goals().get("water-goal").unwrap().target, 10.0);
    }
}
