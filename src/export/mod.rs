// Renderers for a finished extraction: spreadsheet (CSV), screenshot report (HTML), raw JSON

pub mod report;
pub mod spreadsheet;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::extractor::ExtractionResult;

pub const SPREADSHEET_FILE: &str = "playlist_data.csv";
pub const REPORT_FILE: &str = "playlist_screenshots.html";
pub const JSON_FILE: &str = "playlist_data.json";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No data available to export")]
    NoData,

    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize result: {0}")]
    Json(#[from] serde_json::Error),
}

/// Paths of the files written by [`write_all`]
#[derive(Debug, Clone)]
pub struct ExportedFiles {
    pub spreadsheet: PathBuf,
    pub report: PathBuf,
    pub json: PathBuf,
}

/// The user's download directory, else the working directory
pub fn default_output_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Render every output format into `dir`
pub fn write_all(result: &ExtractionResult, dir: &Path) -> Result<ExportedFiles, ExportError> {
    let csv = spreadsheet::render_csv(&result.videos)?;
    let html = report::render_html(result)?;
    let json = serde_json::to_string_pretty(result)?;

    fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let files = ExportedFiles {
        spreadsheet: dir.join(SPREADSHEET_FILE),
        report: dir.join(REPORT_FILE),
        json: dir.join(JSON_FILE),
    };
    write_file(&files.spreadsheet, &csv)?;
    write_file(&files.report, &html)?;
    write_file(&files.json, &json)?;

    info!(dir = %dir.display(), "exports written");
    Ok(files)
}

fn write_file(path: &Path, contents: &str) -> Result<(), ExportError> {
    fs::write(path, contents).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
