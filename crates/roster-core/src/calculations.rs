use std::collections::BTreeMap;

use crate::config::{is_weekday_gated, AdminHourConfig, MAX_ADMIN_HOURS};
use crate::models::{is_weekend, ShiftRecord};

// ── AdminTimeCalculator ───────────────────────────────────────────────────────

/// Stateless collection of administrative-time calculations.
///
/// Every ratio in this domain defines `0/0 := 0`: a staff member with no
/// records gets 0, never NaN, and degenerate inputs never produce an error.
pub struct AdminTimeCalculator;

impl AdminTimeCalculator {
    /// Administrative hours contributed by a single record.
    ///
    /// Looks up `config[shift]` (0 when absent). For the weekday-gated codes
    /// the configured value is zeroed when the date falls on a Saturday or
    /// Sunday; all other codes contribute their configured value on any day.
    pub fn admin_hours(record: &ShiftRecord, config: &AdminHourConfig) -> u8 {
        if is_weekday_gated(&record.shift) && is_weekend(record.date) {
            return 0;
        }
        config.hours_for(&record.shift)
    }

    /// Sum of [`admin_hours`](Self::admin_hours) over all records.
    pub fn total_admin_hours(records: &[ShiftRecord], config: &AdminHourConfig) -> u64 {
        records
            .iter()
            .map(|r| Self::admin_hours(r, config) as u64)
            .sum()
    }

    /// Administrative-time percentage per staff member.
    ///
    /// `100 * sum(admin_hours) / (count * 10)` per name. The denominator
    /// counts every shift at the fixed 10-hour ceiling regardless of its
    /// configured value; that is the normalization baseline, so a staff
    /// member with fewer shifts is measured against fewer max-possible
    /// hours. A name with zero records never appears, and an empty record
    /// set yields an empty map.
    pub fn admin_percentage(
        records: &[ShiftRecord],
        config: &AdminHourConfig,
    ) -> BTreeMap<String, f64> {
        let mut admin_hours: BTreeMap<String, u64> = BTreeMap::new();
        let mut shift_counts: BTreeMap<String, u64> = BTreeMap::new();

        for record in records {
            *admin_hours.entry(record.name.clone()).or_default() +=
                Self::admin_hours(record, config) as u64;
            *shift_counts.entry(record.name.clone()).or_default() += 1;
        }

        admin_hours
            .into_iter()
            .map(|(name, hours)| {
                let shifts = shift_counts.get(&name).copied().unwrap_or(0);
                let pct = if shifts == 0 {
                    0.0
                } else {
                    (hours as f64 / (shifts as f64 * MAX_ADMIN_HOURS as f64)) * 100.0
                };
                (name, pct)
            })
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(name: &str, date: (i32, u32, u32), shift: &str) -> ShiftRecord {
        ShiftRecord::new(
            name,
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            shift,
        )
    }

    // ── admin_hours ───────────────────────────────────────────────────────────

    #[test]
    fn test_admin_hours_plain_lookup() {
        let config = AdminHourConfig::default();
        // 2024-03-04 is a Monday.
        let r = record("Alice", (2024, 3, 4), "CST");
        assert_eq!(AdminTimeCalculator::admin_hours(&r, &config), 10);
    }

    #[test]
    fn test_admin_hours_absent_code_is_zero() {
        let config = AdminHourConfig::default();
        let r = record("Alice", (2024, 3, 4), "NIGHT");
        assert_eq!(AdminTimeCalculator::admin_hours(&r, &config), 0);
    }

    #[test]
    fn test_admin_hours_gated_code_on_weekday() {
        let config = AdminHourConfig::default();
        let r = record("Alice", (2024, 3, 4), "HB AM EDSTTA");
        assert_eq!(AdminTimeCalculator::admin_hours(&r, &config), 5);
    }

    #[test]
    fn test_admin_hours_gated_code_zeroed_on_saturday() {
        let mut config = AdminHourConfig::default();
        config.set_hours("HB AM EDSTTA", 9).unwrap();
        // 2024-03-09 is a Saturday; the gate wins regardless of config.
        let r = record("Alice", (2024, 3, 9), "HB AM EDSTTA");
        assert_eq!(AdminTimeCalculator::admin_hours(&r, &config), 0);
    }

    #[test]
    fn test_admin_hours_gated_code_zeroed_on_sunday() {
        let config = AdminHourConfig::default();
        let r = record("Alice", (2024, 3, 10), "HB IC AM");
        assert_eq!(AdminTimeCalculator::admin_hours(&r, &config), 0);
    }

    #[test]
    fn test_admin_hours_ungated_code_counts_on_weekend() {
        let config = AdminHourConfig::default();
        // CST is not weekday-gated; Saturday still counts the full 10.
        let r = record("Alice", (2024, 3, 9), "CST");
        assert_eq!(AdminTimeCalculator::admin_hours(&r, &config), 10);
    }

    // ── total_admin_hours ─────────────────────────────────────────────────────

    #[test]
    fn test_total_admin_hours() {
        let config = AdminHourConfig::default();
        let records = vec![
            record("Alice", (2024, 3, 4), "CST"),
            record("Alice", (2024, 3, 5), "MIC"),
            record("Bob", (2024, 3, 4), "HB IC PM"),
        ];
        assert_eq!(
            AdminTimeCalculator::total_admin_hours(&records, &config),
            18
        );
    }

    // ── admin_percentage ──────────────────────────────────────────────────────

    #[test]
    fn test_admin_percentage_empty_records() {
        let config = AdminHourConfig::default();
        let pct = AdminTimeCalculator::admin_percentage(&[], &config);
        assert!(pct.is_empty());
    }

    #[test]
    fn test_admin_percentage_never_nan() {
        // A config with only-zero hours still yields finite percentages.
        let config = AdminHourConfig::empty();
        let records = vec![record("Alice", (2024, 3, 4), "CST")];
        let pct = AdminTimeCalculator::admin_percentage(&records, &config);
        assert_eq!(pct["Alice"], 0.0);
        assert!(pct.values().all(|v| v.is_finite()));
    }

    #[test]
    fn test_admin_percentage_alice_scenario() {
        // One CST on a Monday (10 h) and one HB IC AM on a Saturday (gated to
        // 0): 100 * (10 + 0) / (2 * 10) = 50.0.
        let config = AdminHourConfig::default();
        let records = vec![
            record("Alice", (2024, 3, 4), "CST"),
            record("Alice", (2024, 3, 9), "HB IC AM"),
        ];
        let pct = AdminTimeCalculator::admin_percentage(&records, &config);
        assert!((pct["Alice"] - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_admin_percentage_grouped_by_name() {
        let config = AdminHourConfig::default();
        let records = vec![
            record("Alice", (2024, 3, 4), "CST"),
            record("Bob", (2024, 3, 4), "MIC"),
            record("Bob", (2024, 3, 5), "NIGHT"),
        ];
        let pct = AdminTimeCalculator::admin_percentage(&records, &config);
        assert!((pct["Alice"] - 100.0).abs() < f64::EPSILON);
        // Bob: (5 + 0) / (2 * 10) = 25%.
        assert!((pct["Bob"] - 25.0).abs() < f64::EPSILON);
    }
}
