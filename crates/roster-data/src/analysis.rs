//! Top-level analysis pipeline for the roster analyzer.
//!
//! Orchestrates loading and normalization, returning a [`RosterAnalysis`]
//! ready for the presentation layer. All parsing failures surface here,
//! eagerly, at load time; the aggregation queries downstream never see a
//! malformed record.

use std::path::Path;

use chrono::NaiveDate;
use roster_core::error::Result;
use roster_core::models::{GridLayout, ShiftRecordSet};
use tracing::info;

use crate::aggregator::ShiftAggregator;
use crate::loader::load_grid;
use crate::normalizer::{GridNormalizer, YearStrategy};

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the normalized record set.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RosterMetadata {
    /// ISO-8601 timestamp when this analysis was generated.
    pub generated_at: String,
    /// Total rows in the raw grid, metadata rows included.
    pub rows_processed: usize,
    /// Distinct calendar dates on the resolved date axis.
    pub date_columns: usize,
    /// Records emitted by normalization.
    pub records_emitted: usize,
    /// Distinct staff names in the record set.
    pub staff_count: usize,
    /// Wall-clock seconds spent loading the file.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent normalizing the grid.
    pub normalize_time_seconds: f64,
}

/// The complete output of [`analyze_roster`].
#[derive(Debug, Clone)]
pub struct RosterAnalysis {
    /// The normalized record set.
    pub records: ShiftRecordSet,
    /// Metadata about this analysis run.
    pub metadata: RosterMetadata,
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Run the full pipeline against the real-world current date.
///
/// 1. Load the roster file into a raw grid.
/// 2. Normalize the grid into shift records.
/// 3. Return the records with run metadata.
pub fn analyze_roster(
    path: &Path,
    layout: GridLayout,
    strategy: YearStrategy,
) -> Result<RosterAnalysis> {
    analyze_roster_at(path, layout, strategy, chrono::Local::now().date_naive())
}

/// Same as [`analyze_roster`] with an explicit "today" for year inference,
/// enabling deterministic tests.
pub fn analyze_roster_at(
    path: &Path,
    layout: GridLayout,
    strategy: YearStrategy,
    today: NaiveDate,
) -> Result<RosterAnalysis> {
    // ── Step 1: Load the grid ─────────────────────────────────────────────────
    let load_start = std::time::Instant::now();
    let grid = load_grid(path)?;
    let load_time = load_start.elapsed().as_secs_f64();

    // ── Step 2: Normalize ─────────────────────────────────────────────────────
    let normalize_start = std::time::Instant::now();
    let normalizer = GridNormalizer::new(layout, strategy);
    let records = normalizer.normalize_at(&grid, today)?;
    let normalize_time = normalize_start.elapsed().as_secs_f64();

    // ── Step 3: Build the result ──────────────────────────────────────────────
    let date_columns = records
        .iter()
        .map(|r| r.date)
        .collect::<std::collections::BTreeSet<_>>()
        .len();
    let staff_count = ShiftAggregator::staff_names(&records, true).len();

    let metadata = RosterMetadata {
        generated_at: chrono::Utc::now().to_rfc3339(),
        rows_processed: grid.row_count(),
        date_columns,
        records_emitted: records.len(),
        staff_count,
        load_time_seconds: load_time,
        normalize_time_seconds: normalize_time,
    };

    info!(
        path = %path.display(),
        records = metadata.records_emitted,
        staff = metadata.staff_count,
        "roster analyzed"
    );

    Ok(RosterAnalysis { records, metadata })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
