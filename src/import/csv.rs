use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{ImportError, Result};
use crate::import::{has_extension, ImportFormat};
use crate::models::{MetricSample, RawMetricSample};
use crate::validation::SampleValidator;

const REQUIRED_COLUMNS: [&str; 5] = ["date", "sleep", "water", "exercise", "mood"];

/// CSV importer with flexible column mapping
pub struct CsvImporter {
    column_mapping: HashMap<String, String>,
}

impl CsvImporter {
    pub fn new() -> Self {
        let mut column_mapping = HashMap::new();

        // Common column name variations
        Self::add_mapping(&mut column_mapping, "date", &["date", "day"]);
        Self::add_mapping(
            &mut column_mapping,
            "sleep",
            &["sleep", "sleep_hours", "sleephours", "hours_slept"],
        );
        Self::add_mapping(
            &mut column_mapping,
            "water",
            &["water", "water_glasses", "waterglasses", "glasses"],
        );
        Self::add_mapping(
            &mut column_mapping,
            "exercise",
            &["exercise", "exercise_minutes", "exerciseminutes", "activity_minutes"],
        );
        Self::add_mapping(&mut column_mapping, "mood", &["mood", "mood_score"]);
        Self::add_mapping(&mut column_mapping, "notes", &["notes", "note", "comment"]);

        Self { column_mapping }
    }

    fn add_mapping(mapping: &mut HashMap<String, String>, standard: &str, variations: &[&str]) {
        for variation in variations {
            mapping.insert(variation.to_lowercase(), standard.to_string());
        }
    }

    /// Map header positions to standard column names
    fn map_headers(&self, headers: &StringRecord) -> Result<HashMap<String, usize>> {
        let mut positions = HashMap::new();
        for (index, header) in headers.iter().enumerate() {
            if let Some(standard) = self.column_mapping.get(&header.trim().to_lowercase()) {
                positions.entry(standard.clone()).or_insert(index);
            }
        }

        for column in REQUIRED_COLUMNS {
            if !positions.contains_key(column) {
                return Err(ImportError::MissingColumn {
                    column: column.to_string(),
                }
                .into());
            }
        }

        Ok(positions)
    }

    /// Parse CSV text into validated samples
    pub fn parse<R: Read>(&self, reader: R) -> Result<Vec<MetricSample>> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers().map_err(parse_error)?.clone();
        let positions = self.map_headers(&headers)?;

        let mut samples = Vec::new();
        for (index, record) in csv_reader.records().enumerate() {
            let record = record.map_err(parse_error)?;
            // line the record starts on; quoted cells may span lines
            let row = record
                .position()
                .map(|pos| pos.line() as usize)
                .unwrap_or(index + 2);
            let raw = Self::raw_from_record(&record, &positions, row)?;
            let sample = SampleValidator::validate(&raw)
                .map_err(|source| ImportError::InvalidRow { row, source })?;
            samples.push(sample);
        }

        Ok(samples)
    }

    fn raw_from_record(
        record: &StringRecord,
        positions: &HashMap<String, usize>,
        row: usize,
    ) -> Result<RawMetricSample> {
        Ok(RawMetricSample {
            date: field(record, positions, "date").to_string(),
            sleep: parse_number(field(record, positions, "sleep"), "sleep", row)?,
            water: parse_integer(field(record, positions, "water"), "water", row)?,
            exercise: parse_integer(field(record, positions, "exercise"), "exercise", row)?,
            mood: parse_integer(field(record, positions, "mood"), "mood", row)?,
            notes: field(record, positions, "notes").to_string(),
        })
    }
}

impl Default for CsvImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportFormat for CsvImporter {
    fn can_import(&self, file_path: &Path) -> bool {
        has_extension(file_path, "csv")
    }

    fn import_file(&self, file_path: &Path) -> Result<Vec<MetricSample>> {
        let file = File::open(file_path)?;
        self.parse(file)
    }

    fn get_format_name(&self) -> &'static str {
        "CSV"
    }
}

/// Value of a mapped column, empty when the column or cell is absent
fn field<'a>(record: &'a StringRecord, positions: &HashMap<String, usize>, name: &str) -> &'a str {
    positions
        .get(name)
        .and_then(|&i| record.get(i))
        .unwrap_or("")
}

fn parse_error(err: csv::Error) -> ImportError {
    ImportError::ParseError {
        format: "CSV".to_string(),
        reason: err.to_string(),
    }
}

fn parse_number(value: &str, column: &str, row: usize) -> Result<f64> {
    value.parse::<f64>().map_err(|_| {
        ImportError::ParseError {
            format: "CSV".to_string(),
            reason: format!("row {}: '{}' is not a number in column {}", row, value, column),
        }
        .into()
    })
}

fn parse_integer(value: &str, column: &str, row: usize) -> Result<i64> {
    value.parse::<i64>().map_err(|_| {
        ImportError::ParseError {
            format: "CSV".to_string(),
            reason: format!("row {}: '{}' is not a whole number in column {}", row, value, column),
        }
        .into()
    })
}
