use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{HealthRsError, ImportError, Result};
use crate::import::{has_extension, ImportFormat};
use crate::models::{MetricSample, RawMetricSample};
use crate::validation::SampleValidator;

/// JSON importer for an array of samples
///
/// Both snake_case (`sleep`, `water`) and the camelCase field names used by
/// web exports (`sleepHours`, `waterGlasses`) are accepted.
pub struct JsonImporter;

impl JsonImporter {
    pub fn new() -> Self {
        Self
    }

    /// Parse JSON text into validated samples
    pub fn parse<R: Read>(&self, reader: R) -> Result<Vec<MetricSample>> {
        let raw: Vec<RawMetricSample> =
            serde_json::from_reader(reader).map_err(|e| ImportError::ParseError {
                format: "JSON".to_string(),
                reason: e.to_string(),
            })?;

        raw.iter()
            .enumerate()
            .map(|(index, sample)| {
                SampleValidator::validate(sample).map_err(|source| {
                    HealthRsError::from(ImportError::InvalidRow {
                        row: index + 1,
                        source,
                    })
                })
            })
            .collect()
    }
}

impl Default for JsonImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportFormat for JsonImporter {
    fn can_import(&self, file_path: &Path) -> bool {
        has_extension(file_path, "json")
    }

    fn import_file(&self, file_path: &Path) -> Result<Vec<MetricSample>> {
        let file = File::open(file_path)?;
        self.parse(BufReader::new(file))
    }

    fn get_format_name(&self) -> &'static str {
        "JSON"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HealthRsError;

    #[test]
    fn test_parse_json_array() {
        let data = r#"[
            {"date": "2024-01-01", "sleep": 7.5, "water": 8, "exercise": 30, "mood": 5, "notes": "Great"},
            {"date": "2024-01-02", "sleepHours": 6, "waterGlasses": 5, "exerciseMinutes": 15, "mood": 3}
        ]"#;
        let samples = JsonImporter::new().parse(data.as_bytes()).unwrap();

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].notes(), "Great");
        assert_eq!(samples[1].exercise_minutes(), 15);
    }

    #[test]
    fn test_invalid_entry_is_rejected() {
        let data = r#"[{"date": "2024-01-01", "sleep": 7, "water": 8, "exercise": 30, "mood": 0}]"#;
        let err = JsonImporter::new().parse(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            HealthRsError::Import(ImportError::InvalidRow { row: 1, .. })
        ));
    }

    #[test]
    fn test_malformed_json() {
        let err = JsonImporter::new().parse("{not json".as_bytes()).unwrap_err();
        assert!(matches!(err, HealthRsError::Import(ImportError::ParseError { .. })));
    }
}
