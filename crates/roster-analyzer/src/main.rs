mod bootstrap;

use std::collections::BTreeSet;

use anyhow::Result;
use roster_core::calculations::AdminTimeCalculator;
use roster_core::config::AdminHourConfig;
use roster_core::models::{GridLayout, ShiftRecord};
use roster_core::settings::Settings;
use roster_data::aggregator::{DistributionMode, ShiftAggregator};
use roster_data::analysis::analyze_roster;
use roster_data::normalizer::YearStrategy;

fn main() -> Result<()> {
    let settings = Settings::load();
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Roster Analyzer v{} starting", env!("CARGO_PKG_VERSION"));

    let config = load_admin_config(&settings)?;

    if let Some(path) = &settings.export_admin_config {
        config.save_to(path)?;
        println!("Exported admin-hours config to {}", path.display());
        return Ok(());
    }

    let strategy = match settings.anchor_year {
        Some(year) => YearStrategy::FixedAnchor(year),
        None => YearStrategy::CurrentDate,
    };

    let analysis = analyze_roster(&settings.file, GridLayout::default(), strategy)?;

    // Date-range filter: explicit bounds where given, else the roster's own
    // extent.
    let records = match ShiftAggregator::date_bounds(&analysis.records) {
        Some((min, max)) => {
            let start = settings.start_date.unwrap_or(min);
            let end = settings.end_date.unwrap_or(max);
            ShiftAggregator::filter_by_date_range(&analysis.records, start, end)
        }
        None => Vec::new(),
    };

    tracing::info!(
        total = analysis.records.len(),
        in_range = records.len(),
        "applying {} view",
        settings.view
    );

    match settings.view.as_str() {
        "distribution" => print_distribution(&records, settings.percent),
        "weekend" => print_week_split(&records, settings.percent),
        "admin" => print_admin_percentages(&records, &config, settings.include_juniors),
        "median" => print_medians(&records, &settings),
        unknown => eprintln!("Unknown view: {}", unknown),
    }

    Ok(())
}

/// Resolve the admin-hours config: an explicit `--admin-config` import, else
/// the saved config under the home directory, else the built-in table.
fn load_admin_config(settings: &Settings) -> Result<AdminHourConfig> {
    if let Some(path) = &settings.admin_config {
        let (config, report) = AdminHourConfig::load_from(path)?;
        if report.rejected > 0 {
            eprintln!(
                "Dropped {} out-of-range entries from {}",
                report.rejected,
                path.display()
            );
        }
        return Ok(config);
    }

    let default_path = AdminHourConfig::config_path();
    if default_path.exists() {
        if let Ok((config, _)) = AdminHourConfig::load_from(&default_path) {
            tracing::debug!(path = %default_path.display(), "loaded saved admin config");
            return Ok(config);
        }
    }

    Ok(AdminHourConfig::default())
}

// ── Report views ──────────────────────────────────────────────────────────────

fn print_distribution(records: &[ShiftRecord], percent: bool) {
    let mode = if percent {
        DistributionMode::Percentage
    } else {
        DistributionMode::Count
    };
    let dist = ShiftAggregator::shift_distribution(records, mode);

    println!("{:<16} {:>10}", "Shift", if percent { "Share" } else { "Count" });
    for (shift, value) in &dist {
        if percent {
            println!("{:<16} {:>9.1}%", shift, value);
        } else {
            println!("{:<16} {:>10.0}", shift, value);
        }
    }
    println!("{:<16} {:>10}", "Total", records.len());
}

fn print_week_split(records: &[ShiftRecord], percent: bool) {
    let split = ShiftAggregator::weekday_weekend_split(records);
    if percent {
        let (weekday, weekend) = split.percentages();
        println!("{:<16} {:>9.1}%", "Weekday", weekday);
        println!("{:<16} {:>9.1}%", "Weekend", weekend);
    } else {
        println!("{:<16} {:>10}", "Weekday", split.weekday);
        println!("{:<16} {:>10}", "Weekend", split.weekend);
    }
}

fn print_admin_percentages(records: &[ShiftRecord], config: &AdminHourConfig, include_juniors: bool) {
    let names: BTreeSet<String> = ShiftAggregator::staff_names(records, include_juniors)
        .into_iter()
        .collect();
    let selected = ShiftAggregator::filter_by_names(records, &names);
    let percentages = AdminTimeCalculator::admin_percentage(&selected, config);

    println!("{:<24} {:>12}", "Name", "Admin time");
    for (name, pct) in &percentages {
        println!("{:<24} {:>11.1}%", name, pct);
    }
}

fn print_medians(records: &[ShiftRecord], settings: &Settings) {
    let shifts: BTreeSet<String> = if settings.shifts.is_empty() {
        ShiftAggregator::shift_codes(records)
    } else {
        settings.shifts.iter().cloned().collect()
    };
    let staff: BTreeSet<String> =
        ShiftAggregator::staff_names(records, settings.include_juniors)
            .into_iter()
            .collect();
    let medians = ShiftAggregator::median_across_staff(records, &shifts, &staff);

    println!("{:<16} {:>10}", "Shift", "Median");
    for (shift, value) in &medians {
        println!("{:<16} {:>10.1}", shift, value);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
