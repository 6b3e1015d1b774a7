use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Shift codes that never produce a record, exactly as they appear in the
/// roster. Only the two `OFF` casings listed here are excluded; the match is
/// otherwise case-sensitive.
pub const EXCLUDED_SHIFTS: &[&str] = &["OFF", "Off", "RL SMO", "FL SMO", "SL", "PDL SMO"];

/// A rectangular grid of string cells, as read from a spreadsheet or CSV
/// file. Untyped: empty cells are empty strings, and rows may have ragged
/// lengths (short rows read as blank on the right).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawGrid {
    rows: Vec<Vec<String>>,
}

impl RawGrid {
    /// Wrap pre-built rows without further validation.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// All rows, in file order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows, including blank ones.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The cell at `(row, col)`, trimmed, or `""` when the row is short or
    /// absent. Ragged rows are common in exported rosters, so out-of-bounds
    /// reads are not an error.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(|s| s.trim())
            .unwrap_or("")
    }

    /// Widest row length in the grid.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }
}

/// Where the metadata and data live inside a [`RawGrid`], 0-indexed.
///
/// The conventional roster export puts header labels in row 1, date tokens in
/// row 2, data from row 3 on, and staff names in column 0; that is the
/// default. Synthetic grids in tests use other shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    /// Row holding the column header labels.
    pub header_row: usize,
    /// Row holding the per-column date tokens. This row is the single source
    /// of truth for the date axis.
    pub date_row: usize,
    /// First row of shift data.
    pub data_start_row: usize,
    /// Column holding staff names in every data row.
    pub name_column: usize,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            header_row: 1,
            date_row: 2,
            data_start_row: 3,
            name_column: 0,
        }
    }
}

/// A parsed date-column token: weekday abbreviation, day of month, and month
/// number, with no year. The source format is e.g. `"Mon 02-Dec"`; the year
/// is inferred later from column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateToken {
    /// Three-letter weekday abbreviation as written in the sheet.
    pub weekday: String,
    /// Day of month, 1-31.
    pub day: u32,
    /// Month number, 1-12.
    pub month: u32,
}

/// One normalized roster entry: a named staff member working a shift on a
/// fully resolved calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRecord {
    /// Staff name, verbatim from the name column.
    pub name: String,
    /// Resolved calendar date for the shift.
    pub date: NaiveDate,
    /// Shift code, non-empty and never from [`EXCLUDED_SHIFTS`].
    pub shift: String,
}

impl ShiftRecord {
    pub fn new(name: impl Into<String>, date: NaiveDate, shift: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date,
            shift: shift.into(),
        }
    }
}

/// One roster's worth of normalized records, created wholesale by the
/// normalizer and replaced wholesale on the next load.
pub type ShiftRecordSet = Vec<ShiftRecord>;

/// `true` when `shift` is one of the codes that never produce a record.
pub fn is_excluded_shift(shift: &str) -> bool {
    EXCLUDED_SHIFTS.contains(&shift)
}

/// `true` when a staff name marks a junior rotation (`"JNR"` anywhere in the
/// name, case-insensitive). Junior rows survive normalization; presentation
/// layers use this predicate to drop them from staff-selection views.
pub fn is_junior_name(name: &str) -> bool {
    name.to_lowercase().contains("jnr")
}

/// `true` for Saturday and Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
