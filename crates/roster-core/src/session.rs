//! Session-scoped state for one loaded roster.
//!
//! The original tool kept the melted record set and the admin-hour table in
//! ambient per-page storage; here both live in one owning context that is
//! passed by reference into whatever needs them. Replacing the record set is
//! a single field assignment, so a reader never observes a partially updated
//! roster.

use crate::config::AdminHourConfig;
use crate::models::{ShiftRecord, ShiftRecordSet};

/// Owning context for the current record set and admin-hour config.
///
/// The two have independent lifecycles: editing the config does not
/// invalidate the records, and a re-upload does not reset the config.
#[derive(Debug, Clone, Default)]
pub struct RosterContext {
    records: Option<ShiftRecordSet>,
    config: AdminHourConfig,
}

impl RosterContext {
    pub fn new(config: AdminHourConfig) -> Self {
        Self {
            records: None,
            config,
        }
    }

    /// The current record set, or `None` before the first load.
    pub fn records(&self) -> Option<&[ShiftRecord]> {
        self.records.as_deref()
    }

    pub fn has_records(&self) -> bool {
        self.records.is_some()
    }

    /// Replace the record set wholesale. One assignment; the previous set is
    /// dropped, never mutated in place.
    pub fn replace_records(&mut self, records: ShiftRecordSet) {
        self.records = Some(records);
    }

    /// Discard the current record set.
    pub fn clear_records(&mut self) {
        self.records = None;
    }

    pub fn config(&self) -> &AdminHourConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut AdminHourConfig {
        &mut self.config
    }

    /// Swap in a different config, leaving the record set untouched.
    pub fn set_config(&mut self, config: AdminHourConfig) {
        self.config = config;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
