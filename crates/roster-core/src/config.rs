//! The user-editable shift-to-admin-hours mapping.
//!
//! Every shift code maps to an integer number of hours out of 10 that count
//! as administrative time. The mapping is a data input: any concrete table
//! can be imported as a flat `{"SHIFT": hours}` JSON document, edited per
//! entry, and exported back to the same shape. The weekday-only gating of
//! certain shifts is a fixed structural rule layered on top (see
//! [`WEEKDAY_ONLY_SHIFTS`]), deliberately not part of the serialized form.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::warn;

use crate::error::{Result, RosterError};

/// Upper bound for any admin-hours value; also the fixed per-shift ceiling
/// used as the denominator in admin-percentage calculations.
pub const MAX_ADMIN_HOURS: u8 = 10;

/// Shifts whose configured hours only count Monday through Friday. On a
/// Saturday or Sunday they contribute 0 regardless of the configured value.
pub const WEEKDAY_ONLY_SHIFTS: &[&str] = &["HB AM EDSTTA", "HB IC AM"];

/// `true` when `shift` is subject to the weekday-only gate.
pub fn is_weekday_gated(shift: &str) -> bool {
    WEEKDAY_ONLY_SHIFTS.contains(&shift)
}

/// Outcome counters for a config import. `rejected` counts entries dropped
/// for being out of range or non-integer; the import itself still succeeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Entries accepted into the config.
    pub accepted: usize,
    /// Entries dropped during validation.
    pub rejected: usize,
}

/// Mapping from shift code to admin hours in `[0, 10]`.
///
/// Lookups of absent codes yield 0, so a config imported against one roster
/// is harmless when applied to another with a different shift vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminHourConfig {
    hours: BTreeMap<String, u8>,
}

impl Default for AdminHourConfig {
    /// The built-in table, from the original roster tool's hour rules.
    fn default() -> Self {
        let mut hours = BTreeMap::new();
        for (shift, h) in [
            ("CST", 10),
            ("HB IC PM", 3),
            ("HB 21C PM", 3),
            ("MIC", 5),
            ("HB AM EDSTTA", 5),
            ("HB IC AM", 5),
        ] {
            hours.insert(shift.to_string(), h);
        }
        Self { hours }
    }
}

impl AdminHourConfig {
    /// An empty mapping (every lookup yields 0).
    pub fn empty() -> Self {
        Self {
            hours: BTreeMap::new(),
        }
    }

    /// Configured hours for `shift`, or 0 when the code is absent.
    pub fn hours_for(&self, shift: &str) -> u8 {
        self.hours.get(shift).copied().unwrap_or(0)
    }

    /// Set the hours for a shift code, validating the `[0, 10]` range.
    pub fn set_hours(&mut self, shift: impl Into<String>, hours: u8) -> Result<()> {
        if hours > MAX_ADMIN_HOURS {
            return Err(RosterError::Config(format!(
                "admin hours must be in [0, {MAX_ADMIN_HOURS}], got {hours}"
            )));
        }
        self.hours.insert(shift.into(), hours);
        Ok(())
    }

    /// All configured shift codes, sorted.
    pub fn shift_codes(&self) -> impl Iterator<Item = &str> {
        self.hours.keys().map(|s| s.as_str())
    }

    /// Number of configured entries.
    pub fn len(&self) -> usize {
        self.hours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }

    // ── Import / export ───────────────────────────────────────────────────────

    /// Build a config from a flat `{"SHIFT": hours}` JSON value.
    ///
    /// Entries whose value is not an integer in `[0, 10]` are dropped
    /// individually and counted in the returned [`ImportReport`]; a document
    /// that is not a JSON object fails outright.
    pub fn import(value: &Value) -> Result<(Self, ImportReport)> {
        let Some(map) = value.as_object() else {
            return Err(RosterError::Config(
                "admin-hour config must be a flat JSON object".to_string(),
            ));
        };

        let mut hours = BTreeMap::new();
        let mut report = ImportReport::default();

        for (shift, v) in map {
            match v.as_u64() {
                Some(h) if h <= MAX_ADMIN_HOURS as u64 => {
                    hours.insert(shift.clone(), h as u8);
                    report.accepted += 1;
                }
                _ => {
                    warn!(shift = %shift, value = %v, "dropping out-of-range admin-hours entry");
                    report.rejected += 1;
                }
            }
        }

        Ok((Self { hours }, report))
    }

    /// Parse a flat JSON document string via [`AdminHourConfig::import`].
    pub fn from_json_str(s: &str) -> Result<(Self, ImportReport)> {
        let value: Value = serde_json::from_str(s)?;
        Self::import(&value)
    }

    /// Export to the flat `{"SHIFT": hours}` structure.
    /// `import(export(config))` reproduces the config exactly.
    pub fn export(&self) -> BTreeMap<String, u8> {
        self.hours.clone()
    }

    /// Export to a pretty-printed flat JSON document.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.hours)?)
    }

    // ── File-backed variants ──────────────────────────────────────────────────

    /// Default on-disk location: `~/.roster-analyzer/admin_hours.json`.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// The config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(".roster-analyzer").join("admin_hours.json")
    }

    /// Load a config from an explicit path.
    pub fn load_from(path: &Path) -> Result<(Self, ImportReport)> {
        let content = std::fs::read_to_string(path).map_err(|source| RosterError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Write the exported config to `path`, creating parent directories.
    /// Writes to a temp file then renames.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json_string()?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
