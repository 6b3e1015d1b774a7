//! Aggregate queries over a normalized shift record set.
//!
//! Pure functions: every query takes `&[ShiftRecord]` plus its parameters
//! and returns fresh values. All queries are total given a well-formed
//! record set; every ratio defines `0/0 := 0` instead of erroring.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use roster_core::models::{is_junior_name, is_weekend, ShiftRecord, ShiftRecordSet};

// ── DistributionMode ──────────────────────────────────────────────────────────

/// Whether a distribution reports raw counts or percentages of the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistributionMode {
    Count,
    Percentage,
}

// ── WeekSplit ─────────────────────────────────────────────────────────────────

/// Counts of records falling on weekdays versus weekend days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekSplit {
    pub weekday: usize,
    pub weekend: usize,
}

impl WeekSplit {
    pub fn total(&self) -> usize {
        self.weekday + self.weekend
    }

    /// `(weekday_pct, weekend_pct)`, each side divided by their sum rather
    /// than the total record count, so the two always add to 100 even when
    /// upstream filters removed other days. An empty split is `(0, 0)`.
    pub fn percentages(&self) -> (f64, f64) {
        let total = self.total();
        if total == 0 {
            return (0.0, 0.0);
        }
        (
            self.weekday as f64 / total as f64 * 100.0,
            self.weekend as f64 / total as f64 * 100.0,
        )
    }
}

// ── ShiftAggregator ───────────────────────────────────────────────────────────

/// Stateless helper grouping and counting shift records.
pub struct ShiftAggregator;

impl ShiftAggregator {
    /// Records whose date falls within `[start, end]`, inclusive on both
    /// ends.
    pub fn filter_by_date_range(
        records: &[ShiftRecord],
        start: NaiveDate,
        end: NaiveDate,
    ) -> ShiftRecordSet {
        records
            .iter()
            .filter(|r| r.date >= start && r.date <= end)
            .cloned()
            .collect()
    }

    /// Records belonging to any of the given staff names.
    pub fn filter_by_names(records: &[ShiftRecord], names: &BTreeSet<String>) -> ShiftRecordSet {
        records
            .iter()
            .filter(|r| names.contains(&r.name))
            .cloned()
            .collect()
    }

    /// Records bearing any of the given shift codes.
    pub fn filter_by_shifts(records: &[ShiftRecord], shifts: &BTreeSet<String>) -> ShiftRecordSet {
        records
            .iter()
            .filter(|r| shifts.contains(&r.shift))
            .cloned()
            .collect()
    }

    /// Frequency of each shift code, as counts or as percentages of the
    /// total depending on `mode`. The toggle is applied uniformly after
    /// counting; an empty record set yields an empty map either way.
    pub fn shift_distribution(
        records: &[ShiftRecord],
        mode: DistributionMode,
    ) -> BTreeMap<String, f64> {
        let mut counts: BTreeMap<String, f64> = BTreeMap::new();
        for record in records {
            *counts.entry(record.shift.clone()).or_default() += 1.0;
        }

        if mode == DistributionMode::Percentage {
            let total = records.len() as f64;
            for value in counts.values_mut() {
                *value = *value / total * 100.0;
            }
        }

        counts
    }

    /// Split the records into weekday and weekend (Saturday/Sunday) counts.
    pub fn weekday_weekend_split(records: &[ShiftRecord]) -> WeekSplit {
        let mut split = WeekSplit::default();
        for record in records {
            if is_weekend(record.date) {
                split.weekend += 1;
            } else {
                split.weekday += 1;
            }
        }
        split
    }

    /// Per-shift median of per-staff shift counts, as a population baseline.
    ///
    /// Groups `records` by name, counts each shift in `shifts` per staff
    /// member, then takes the column-wise median across the `staff`
    /// universe. A staff member with no matching records contributes a zero
    /// count, not an omission; that zero-fill materially changes the median
    /// and is the point of taking `staff` as an explicit parameter.
    pub fn median_across_staff(
        records: &[ShiftRecord],
        shifts: &BTreeSet<String>,
        staff: &BTreeSet<String>,
    ) -> BTreeMap<String, f64> {
        let mut counts: BTreeMap<(&str, &str), u64> = BTreeMap::new();
        for record in records {
            if !staff.contains(&record.name) || !shifts.contains(&record.shift) {
                continue;
            }
            *counts
                .entry((record.name.as_str(), record.shift.as_str()))
                .or_default() += 1;
        }

        shifts
            .iter()
            .map(|shift| {
                let per_staff: Vec<u64> = staff
                    .iter()
                    .map(|name| {
                        counts
                            .get(&(name.as_str(), shift.as_str()))
                            .copied()
                            .unwrap_or(0)
                    })
                    .collect();
                (shift.clone(), median(per_staff))
            })
            .collect()
    }

    /// Staff with at least one record bearing exactly `shift_code`.
    pub fn users_with_shift(records: &[ShiftRecord], shift_code: &str) -> BTreeSet<String> {
        records
            .iter()
            .filter(|r| r.shift == shift_code)
            .map(|r| r.name.clone())
            .collect()
    }

    /// Sorted distinct staff names. Junior rotations (names containing
    /// `"JNR"`) are dropped unless `include_juniors` is set.
    pub fn staff_names(records: &[ShiftRecord], include_juniors: bool) -> Vec<String> {
        let names: BTreeSet<&str> = records
            .iter()
            .map(|r| r.name.as_str())
            .filter(|n| include_juniors || !is_junior_name(n))
            .collect();
        names.into_iter().map(str::to_string).collect()
    }

    /// Earliest and latest record date, or `None` for an empty set.
    pub fn date_bounds(records: &[ShiftRecord]) -> Option<(NaiveDate, NaiveDate)> {
        let min = records.iter().map(|r| r.date).min()?;
        let max = records.iter().map(|r| r.date).max()?;
        Some((min, max))
    }

    /// Sorted distinct shift codes present in the record set.
    pub fn shift_codes(records: &[ShiftRecord]) -> BTreeSet<String> {
        records.iter().map(|r| r.shift.clone()).collect()
    }
}

/// Median of unsorted counts; empty input yields 0.
fn median(mut values: Vec<u64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_unstable();
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid] as f64
    } else {
        (values[mid - 1] + values[mid]) as f64 / 2.0
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn record(name: &str, date: (i32, u32, u32), shift: &str) -> ShiftRecord {
        ShiftRecord::new(
            name,
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            shift,
        )
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    // ── filter_by_date_range ──────────────────────────────────────────────────

    #[test]
    fn test_date_range_filter_inclusive_bounds() {
        let records = vec![
            record("Alice", (2024, 3, 3), "CST"),
            record("Alice", (2024, 3, 4), "CST"),
            record("Alice", (2024, 3, 5), "CST"),
            record("Alice", (2024, 3, 6), "CST"),
        ];
        let filtered = ShiftAggregator::filter_by_date_range(
            &records,
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        );
        let days: Vec<u32> = filtered.iter().map(|r| r.date.day()).collect();
        assert_eq!(days, vec![4, 5]);
    }

    #[test]
    fn test_date_range_filter_does_not_mutate_input() {
        let records = vec![record("Alice", (2024, 3, 4), "CST")];
        let _ = ShiftAggregator::filter_by_date_range(
            &records,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        );
        assert_eq!(records.len(), 1);
    }

    // ── filter_by_names ───────────────────────────────────────────────────────

    #[test]
    fn test_name_filter() {
        let records = vec![
            record("Alice", (2024, 3, 4), "CST"),
            record("Bob", (2024, 3, 4), "MIC"),
        ];
        let filtered = ShiftAggregator::filter_by_names(&records, &set(&["Bob"]));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Bob");
    }

    // ── filter_by_shifts ──────────────────────────────────────────────────────

    #[test]
    fn test_shift_filter() {
        let records = vec![
            record("Alice", (2024, 3, 4), "CST"),
            record("Alice", (2024, 3, 5), "MIC"),
            record("Bob", (2024, 3, 4), "NIGHT"),
        ];
        let filtered = ShiftAggregator::filter_by_shifts(&records, &set(&["CST", "NIGHT"]));
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.shift != "MIC"));
    }

    // ── shift_distribution ────────────────────────────────────────────────────

    #[test]
    fn test_distribution_counts() {
        let records = vec![
            record("Alice", (2024, 3, 4), "CST"),
            record("Bob", (2024, 3, 4), "CST"),
            record("Alice", (2024, 3, 5), "MIC"),
        ];
        let dist = ShiftAggregator::shift_distribution(&records, DistributionMode::Count);
        assert_eq!(dist["CST"], 2.0);
        assert_eq!(dist["MIC"], 1.0);
    }

    #[test]
    fn test_distribution_percentages_sum_to_hundred() {
        let records = vec![
            record("Alice", (2024, 3, 4), "CST"),
            record("Bob", (2024, 3, 4), "CST"),
            record("Alice", (2024, 3, 5), "MIC"),
            record("Bob", (2024, 3, 5), "NIGHT"),
        ];
        let dist = ShiftAggregator::shift_distribution(&records, DistributionMode::Percentage);
        assert!((dist["CST"] - 50.0).abs() < f64::EPSILON);
        let sum: f64 = dist.values().sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_distribution_empty_records() {
        let dist = ShiftAggregator::shift_distribution(&[], DistributionMode::Percentage);
        assert!(dist.is_empty());
    }

    // ── weekday_weekend_split ─────────────────────────────────────────────────

    #[test]
    fn test_week_split_counts() {
        let records = vec![
            record("Alice", (2024, 3, 4), "CST"),  // Monday
            record("Alice", (2024, 3, 8), "CST"),  // Friday
            record("Alice", (2024, 3, 9), "CST"),  // Saturday
            record("Alice", (2024, 3, 10), "CST"), // Sunday
        ];
        let split = ShiftAggregator::weekday_weekend_split(&records);
        assert_eq!(split.weekday, 2);
        assert_eq!(split.weekend, 2);
    }

    #[test]
    fn test_week_split_percentages_divide_by_their_sum() {
        let split = WeekSplit {
            weekday: 3,
            weekend: 1,
        };
        let (wd, we) = split.percentages();
        assert!((wd - 75.0).abs() < f64::EPSILON);
        assert!((we - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_week_split_empty_is_zero_not_nan() {
        let (wd, we) = WeekSplit::default().percentages();
        assert_eq!(wd, 0.0);
        assert_eq!(we, 0.0);
    }

    // ── median_across_staff ───────────────────────────────────────────────────

    #[test]
    fn test_median_zero_fills_absent_staff() {
        // A has two CST records; B is in the roster but has none. The median
        // must be over [2, 0], not [2].
        let records = vec![
            record("A", (2024, 3, 4), "CST"),
            record("A", (2024, 3, 5), "CST"),
        ];
        let medians = ShiftAggregator::median_across_staff(
            &records,
            &set(&["CST"]),
            &set(&["A", "B"]),
        );
        assert!((medians["CST"] - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_median_restricted_to_shift_set() {
        let records = vec![
            record("A", (2024, 3, 4), "CST"),
            record("A", (2024, 3, 5), "MIC"),
        ];
        let medians =
            ShiftAggregator::median_across_staff(&records, &set(&["CST"]), &set(&["A"]));
        assert_eq!(medians.len(), 1);
        assert!(medians.contains_key("CST"));
    }

    #[test]
    fn test_median_odd_staff_count() {
        let records = vec![
            record("A", (2024, 3, 4), "CST"),
            record("A", (2024, 3, 5), "CST"),
            record("A", (2024, 3, 6), "CST"),
            record("B", (2024, 3, 4), "CST"),
        ];
        let medians = ShiftAggregator::median_across_staff(
            &records,
            &set(&["CST"]),
            &set(&["A", "B", "C"]),
        );
        // Counts are [3, 1, 0] -> median 1.
        assert!((medians["CST"] - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_median_empty_staff_universe() {
        let medians =
            ShiftAggregator::median_across_staff(&[], &set(&["CST"]), &BTreeSet::new());
        assert_eq!(medians["CST"], 0.0);
    }

    // ── users_with_shift ──────────────────────────────────────────────────────

    #[test]
    fn test_users_with_shift_exact_code() {
        let records = vec![
            record("Alice", (2024, 3, 4), "CST"),
            record("Bob", (2024, 3, 4), "MIC"),
            record("Cara", (2024, 3, 5), "CST"),
        ];
        let users = ShiftAggregator::users_with_shift(&records, "CST");
        assert_eq!(users, set(&["Alice", "Cara"]));
        assert!(ShiftAggregator::users_with_shift(&records, "cst").is_empty());
    }

    // ── staff_names ───────────────────────────────────────────────────────────

    #[test]
    fn test_staff_names_filters_juniors_by_default() {
        let records = vec![
            record("Alice", (2024, 3, 4), "CST"),
            record("Smith JNR", (2024, 3, 4), "CST"),
        ];
        assert_eq!(
            ShiftAggregator::staff_names(&records, false),
            vec!["Alice".to_string()]
        );
        assert_eq!(ShiftAggregator::staff_names(&records, true).len(), 2);
    }

    // ── date_bounds ───────────────────────────────────────────────────────────

    #[test]
    fn test_date_bounds() {
        let records = vec![
            record("Alice", (2024, 3, 9), "CST"),
            record("Alice", (2024, 3, 4), "CST"),
            record("Alice", (2024, 3, 6), "CST"),
        ];
        let (min, max) = ShiftAggregator::date_bounds(&records).unwrap();
        assert_eq!(min, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(max, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert!(ShiftAggregator::date_bounds(&[]).is_none());
    }

    // ── median helper ─────────────────────────────────────────────────────────

    #[test]
    fn test_median_helper() {
        assert_eq!(median(vec![]), 0.0);
        assert_eq!(median(vec![5]), 5.0);
        assert_eq!(median(vec![2, 0]), 1.0);
        assert_eq!(median(vec![3, 1, 2]), 2.0);
        assert_eq!(median(vec![4, 1, 2, 3]), 2.5);
    }
}
