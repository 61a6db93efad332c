//! Helpers for saving export downloads to disk.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Pdf,
    Json,
    Csv,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Pdf, ExportFormat::Json, ExportFormat::Csv];

    /// Path segment of the export endpoint
    pub fn path_segment(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn extension(self) -> &'static str {
        self.path_segment()
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
        }
    }

    /// `health-records-YYYY-MM-DD.<ext>`
    pub fn default_filename(self, date: NaiveDate) -> String {
        format!("health-records-{}.{}", date.format("%Y-%m-%d"), self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        ExportFormat::ALL
            .into_iter()
            .find(|f| f.path_segment().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow::anyhow!("Unknown export format: {} (expected pdf, json or csv)", s))
    }
}

/// Resolve where an export should be written.
///
/// An existing directory (or a path ending in a separator) gets the default
/// filename appended; anything else is used as the file path.
pub fn resolve_export_path(target: &Path, format: ExportFormat, date: NaiveDate) -> PathBuf {
    let ends_with_separator = target
        .as_os_str()
        .to_string_lossy()
        .ends_with(std::path::MAIN_SEPARATOR);
    if target.is_dir() || ends_with_separator {
        target.join(format.default_filename(date))
    } else {
        target.to_path_buf()
    }
}

/// Write an export blob, creating parent directories as needed.
pub fn save_export(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), size = bytes.len(), "Export saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 9).unwrap()
    }

    #[test]
    fn test_default_filename() {
        assert_eq!(ExportFormat::Pdf.default_filename(date()), "health-records-2026-03-09.pdf");
        assert_eq!(ExportFormat::Csv.default_filename(date()), "health-records-2026-03-09.csv");
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("PDF".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("xml".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_resolve_and_save() {
        let dir = tempfile::tempdir().unwrap();

        let into_dir = resolve_export_path(dir.path(), ExportFormat::Json, date());
        assert_eq!(into_dir, dir.path().join("health-records-2026-03-09.json"));

        let explicit = dir.path().join("nested").join("mine.pdf");
        let resolved = resolve_export_path(&explicit, ExportFormat::Pdf, date());
        assert_eq!(resolved, explicit);

        save_export(&resolved, b"%PDF-1.7").unwrap();
        assert_eq!(std::fs::read(&resolved).unwrap(), b"%PDF-1.7");
    }
}
