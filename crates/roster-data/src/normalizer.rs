//! Grid normalization: raw roster grid to tidy shift records.
//!
//! The roster sheet stores one staff member per row and one date per column,
//! with the date columns labelled only by weekday abbreviation, day, and
//! month (`"Mon 02-Dec"`, no year). Normalization parses those tokens,
//! infers the missing year from column order, and unpivots the grid into
//! one [`ShiftRecord`] per non-blank cell, dropping the excluded shift
//! codes along the way.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use tracing::debug;

use roster_core::error::{Result, RosterError};
use roster_core::models::{
    is_excluded_shift, DateToken, GridLayout, RawGrid, ShiftRecord, ShiftRecordSet,
};

// ── YearStrategy ──────────────────────────────────────────────────────────────

/// How the missing year is recovered for the date columns.
///
/// Both strategies roll the year forward by exactly one every time a
/// column's month is numerically smaller than the previous column's month.
/// That handles a single Dec-to-Jan wraparound; a roster spanning more than
/// about twelve months is out of range for either strategy and resolves
/// incorrectly by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearStrategy {
    /// Start from the given year.
    FixedAnchor(i32),
    /// Derive the starting year from the real-world current date: when the
    /// first column's month is greater than the current month the roster
    /// began last year, otherwise this year.
    CurrentDate,
}

impl Default for YearStrategy {
    fn default() -> Self {
        Self::CurrentDate
    }
}

// ── GridNormalizer ────────────────────────────────────────────────────────────

/// Turns a [`RawGrid`] into a [`ShiftRecordSet`].
///
/// Fails with [`RosterError::MalformedGrid`] when the grid violates the
/// layout's row assumptions and with [`RosterError::DateToken`] when a date
/// label cannot be parsed or resolved; nothing is partially applied on
/// failure.
#[derive(Debug, Clone, Default)]
pub struct GridNormalizer {
    layout: GridLayout,
    strategy: YearStrategy,
}

impl GridNormalizer {
    pub fn new(layout: GridLayout, strategy: YearStrategy) -> Self {
        Self { layout, strategy }
    }

    /// Normalize against the real-world current date.
    pub fn normalize(&self, grid: &RawGrid) -> Result<ShiftRecordSet> {
        self.normalize_at(grid, chrono::Local::now().date_naive())
    }

    /// Full implementation with an explicit "today", so year inference is
    /// testable without depending on the wall clock.
    pub fn normalize_at(&self, grid: &RawGrid, today: NaiveDate) -> Result<ShiftRecordSet> {
        let layout = &self.layout;

        // The date row is the single source of truth for the date axis and
        // must sit above the data block.
        if layout.date_row >= layout.data_start_row {
            return Err(RosterError::MalformedGrid(format!(
                "date row {} does not precede data start row {}",
                layout.date_row, layout.data_start_row
            )));
        }
        if grid.row_count() < layout.data_start_row {
            return Err(RosterError::MalformedGrid(format!(
                "expected at least {} metadata rows, found {}",
                layout.data_start_row,
                grid.row_count()
            )));
        }

        // ── Date columns ──────────────────────────────────────────────────────
        let token_re = date_token_regex();
        let mut columns: Vec<usize> = Vec::new();
        let mut tokens: Vec<DateToken> = Vec::new();
        let mut dropped_columns = 0usize;

        for col in (layout.name_column + 1)..grid.column_count() {
            let raw = grid.cell(layout.date_row, col);
            if raw.is_empty() {
                // A column with no date label is dropped before reshaping.
                dropped_columns += 1;
                continue;
            }
            tokens.push(parse_date_token(raw, &token_re)?);
            columns.push(col);
        }

        if columns.is_empty() {
            return Err(RosterError::MalformedGrid(format!(
                "date row {} holds no date tokens",
                layout.date_row
            )));
        }

        let dates = self.resolve_dates(&tokens, today)?;

        // ── Unpivot ───────────────────────────────────────────────────────────
        let mut records: ShiftRecordSet = Vec::new();
        let mut blank_rows = 0usize;
        let mut excluded = 0usize;

        for row in layout.data_start_row..grid.row_count() {
            let name = grid.cell(row, layout.name_column);
            if name.is_empty() {
                // Covers fully blank rows as well; neither emits records.
                blank_rows += 1;
                continue;
            }

            for (&col, &date) in columns.iter().zip(dates.iter()) {
                let shift = grid.cell(row, col);
                if shift.is_empty() {
                    continue;
                }
                if is_excluded_shift(shift) {
                    excluded += 1;
                    continue;
                }
                records.push(ShiftRecord::new(name, date, shift));
            }
        }

        debug!(
            records = records.len(),
            date_columns = columns.len(),
            dropped_columns,
            blank_rows,
            excluded,
            "grid normalized"
        );

        Ok(records)
    }

    // ── Private ───────────────────────────────────────────────────────────────

    /// Attach a year to every token, rolling forward on month decreases.
    fn resolve_dates(&self, tokens: &[DateToken], today: NaiveDate) -> Result<Vec<NaiveDate>> {
        let mut year = match self.strategy {
            YearStrategy::FixedAnchor(y) => y,
            YearStrategy::CurrentDate => {
                if tokens[0].month > today.month() {
                    today.year() - 1
                } else {
                    today.year()
                }
            }
        };

        let mut prev_month = tokens[0].month;
        let mut dates = Vec::with_capacity(tokens.len());

        for token in tokens {
            if token.month < prev_month {
                year += 1;
            }
            prev_month = token.month;

            let date = NaiveDate::from_ymd_opt(year, token.month, token.day).ok_or_else(|| {
                RosterError::DateToken(format!(
                    "{} {:02}-{:02} is not a real calendar date in {}",
                    token.weekday, token.day, token.month, year
                ))
            })?;

            // The sheet's weekday label is advisory; a mismatch usually means
            // the roster spans more than one wraparound.
            if !weekday_matches(&token.weekday, date) {
                debug!(
                    token = %token.weekday,
                    resolved = %date,
                    "weekday abbreviation disagrees with resolved date"
                );
            }

            dates.push(date);
        }

        Ok(dates)
    }
}

// ── Token parsing ─────────────────────────────────────────────────────────────

fn date_token_regex() -> Regex {
    // Weekday word, day of month, month word; any embedded year is ignored.
    Regex::new(r"^([A-Za-z]{3,})\s+(\d{1,2})[-/ ]+([A-Za-z]{3,})").expect("regex is valid")
}

/// Parse a raw date label like `"Mon 02-Dec"` into a [`DateToken`].
///
/// Tolerates `-`, `/`, or spaces between day and month, longer weekday or
/// month words, and a trailing embedded year, which is discarded.
fn parse_date_token(raw: &str, re: &Regex) -> Result<DateToken> {
    let caps = re
        .captures(raw)
        .ok_or_else(|| RosterError::DateToken(raw.to_string()))?;

    let weekday = caps[1].to_string();
    let day: u32 = caps[2]
        .parse()
        .map_err(|_| RosterError::DateToken(raw.to_string()))?;
    let month = month_number(&caps[3]).ok_or_else(|| RosterError::DateToken(raw.to_string()))?;

    if day == 0 || day > 31 {
        return Err(RosterError::DateToken(raw.to_string()));
    }

    Ok(DateToken {
        weekday,
        day,
        month,
    })
}

/// Month number from the first three letters of a month word.
fn month_number(word: &str) -> Option<u32> {
    let abbrev: String = word.chars().take(3).collect::<String>().to_lowercase();
    let n = match abbrev.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(n)
}

fn weekday_matches(abbrev: &str, date: NaiveDate) -> bool {
    let expected = date.format("%a").to_string();
    let given: String = abbrev.chars().take(3).collect();
    given.eq_ignore_ascii_case(&expected)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
