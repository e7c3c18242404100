use std::path::Path;
use tracing::info;

use crate::error::{ImportError, Result};
use crate::history::MetricHistory;
use crate::models::MetricSample;

pub mod csv;
pub mod json;

/// Trait for reading metric history from different file formats
pub trait ImportFormat {
    /// Check if this importer can handle the given file
    fn can_import(&self, file_path: &Path) -> bool;

    /// Read and validate every sample in the file, in file order
    fn import_file(&self, file_path: &Path) -> Result<Vec<MetricSample>>;

    /// Get the format name for this importer
    fn get_format_name(&self) -> &'static str;
}

/// Check a path's extension case-insensitively
pub(crate) fn has_extension(file_path: &Path, expected: &str) -> bool {
    file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(expected))
        .unwrap_or(false)
}

/// Manager for coordinating different import formats
pub struct ImportManager {
    importers: Vec<Box<dyn ImportFormat>>,
}

impl ImportManager {
    /// Create a new import manager with all available importers
    pub fn new() -> Self {
        let importers: Vec<Box<dyn ImportFormat>> = vec![
            Box::new(csv::CsvImporter::new()),
            Box::new(json::JsonImporter::new()),
        ];

        Self { importers }
    }

    /// Import a single file, auto-detecting the format
    pub fn import_file(&self, file_path: &Path) -> Result<Vec<MetricSample>> {
        let importer = self
            .importers
            .iter()
            .find(|importer| importer.can_import(file_path))
            .ok_or_else(|| ImportError::UnsupportedFormat {
                path: file_path.to_path_buf(),
            })?;

        info!(
            file = %file_path.display(),
            format = importer.get_format_name(),
            "Importing metric history"
        );

        let samples = importer.import_file(file_path)?;
        info!(count = samples.len(), "Imported metric samples");
        Ok(samples)
    }

    /// Import a file straight into a history
    pub fn import_history(&self, file_path: &Path) -> Result<MetricHistory> {
        self.import_file(file_path).map(MetricHistory::from)
    }

    /// Check if this manager can import a given file
    pub fn can_import_file(&self, file_path: &Path) -> bool {
        self.importers.iter().any(|importer| importer.can_import(file_path))
    }
}

impl Default for ImportManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HealthRsError;

    #[test]
    fn test_format_detection() {
        let manager = ImportManager::new();
        assert!(manager.can_import_file(Path::new("history.csv")));
        assert!(manager.can_import_file(Path::new("HISTORY.JSON")));
        assert!(!manager.can_import_file(Path::new("history.xlsx")));
        assert!(!manager.can_import_file(Path::new("history")));
    }

    #[test]
    fn test_unsupported_format_error() {
        let manager = ImportManager::new();
        let err = manager.import_file(Path::new("history.txt")).unwrap_err();
        assert!(matches!(
            err,
            HealthRsError::Import(ImportError::UnsupportedFormat { .. })
        ));
    }
}
