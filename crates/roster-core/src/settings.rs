use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// Roster normalization and per-staff shift analytics
#[derive(Parser, Debug, Clone)]
#[command(
    name = "roster-analyzer",
    about = "Normalize a roster spreadsheet and report per-staff shift analytics",
    version
)]
pub struct Settings {
    /// Roster file to analyze (.xlsx, .xls, or .csv)
    pub file: PathBuf,

    /// Report to print
    #[arg(long, default_value = "distribution", value_parser = ["distribution", "weekend", "admin", "median"])]
    pub view: String,

    /// Inclusive start of the date range filter (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Inclusive end of the date range filter (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<NaiveDate>,

    /// Show percentages instead of counts where the view supports it
    #[arg(long)]
    pub percent: bool,

    /// Shift codes for the median view (repeatable; defaults to all codes)
    #[arg(long = "shift")]
    pub shifts: Vec<String>,

    /// Keep staff whose name contains "JNR" in staff listings
    #[arg(long)]
    pub include_juniors: bool,

    /// Anchor year for date inference instead of deriving it from today
    #[arg(long)]
    pub anchor_year: Option<i32>,

    /// Admin-hours config to import (flat {"SHIFT": hours} JSON)
    #[arg(long)]
    pub admin_config: Option<PathBuf>,

    /// Export the effective admin-hours config to this path and exit 0
    #[arg(long)]
    pub export_admin_config: Option<PathBuf>,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse CLI arguments, applying the `--debug` override.
    pub fn load() -> Self {
        Self::finalize(Self::parse())
    }

    fn finalize(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Same as [`load`](Self::load) with an explicit argument list, enabling
    /// unit tests without spawning subprocesses.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::finalize(Self::parse_from(args))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
