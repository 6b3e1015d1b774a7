//! Roster file loading for the analyzer.
//!
//! Adapts spreadsheet workbooks (via `calamine`, first sheet only) and CSV
//! files (via `csv`) to the same untyped [`RawGrid`] so the normalizer never
//! sees the file format. Also translates Google Drive share links into their
//! direct-download form; actual retrieval happens outside this crate.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use roster_core::error::{Result, RosterError};
use roster_core::models::RawGrid;
use tracing::debug;

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a roster file into a [`RawGrid`], dispatching on the file extension:
/// `.csv` through the CSV reader, everything else through the auto-detecting
/// workbook reader.
pub fn load_grid(path: &Path) -> Result<RawGrid> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        load_csv_grid(path)
    } else {
        load_workbook_grid(path)
    }
}

/// Translate a Google Drive share link into its direct-download form.
///
/// Accepts the `/file/d/<id>/...` and `...?id=<id>` share shapes. Fails with
/// [`RosterError::InvalidUrl`] before any parsing is attempted on anything
/// that is not a Drive link or carries no file id.
pub fn translate_drive_url(url: &str) -> Result<String> {
    let trimmed = url.trim();

    if !trimmed.starts_with("https://drive.google.com/") {
        return Err(RosterError::InvalidUrl(url.to_string()));
    }

    // Share form: https://drive.google.com/file/d/<id>/view?usp=sharing
    if let Some(rest) = trimmed.strip_prefix("https://drive.google.com/file/d/") {
        let id = rest.split(['/', '?']).next().unwrap_or("");
        if !id.is_empty() {
            return Ok(direct_download_url(id));
        }
    }

    // Query form: https://drive.google.com/open?id=<id>
    if let Some(pos) = trimmed.find("id=") {
        let id = trimmed[pos + 3..].split('&').next().unwrap_or("");
        if !id.is_empty() {
            return Ok(direct_download_url(id));
        }
    }

    Err(RosterError::InvalidUrl(url.to_string()))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn direct_download_url(id: &str) -> String {
    format!("https://drive.google.com/uc?export=download&id={id}")
}

/// Read the first worksheet of a workbook into string rows.
fn load_workbook_grid(path: &Path) -> Result<RawGrid> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| RosterError::Workbook(e.to_string()))?;

    // First sheet only, by convention.
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| RosterError::Workbook("workbook has no sheets".to_string()))?
        .map_err(|e| RosterError::Workbook(e.to_string()))?;

    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    debug!(
        path = %path.display(),
        rows = rows.len(),
        "loaded workbook grid"
    );

    Ok(RawGrid::from_rows(rows))
}

/// Read a headerless, possibly ragged CSV file into string rows.
fn load_csv_grid(path: &Path) -> Result<RawGrid> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| RosterError::Csv(e.to_string()))?;

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| RosterError::Csv(e.to_string()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    debug!(path = %path.display(), rows = rows.len(), "loaded CSV grid");

    Ok(RawGrid::from_rows(rows))
}

/// Stringify one workbook cell. Empty and error cells become `""`; floats
/// that carry an integral value lose the trailing `.0` so day numbers read
/// back as written.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.to_string())
            .unwrap_or_default(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(_) => String::new(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
