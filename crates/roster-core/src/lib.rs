//! Core domain types for the roster analyzer.
//!
//! Defines the raw-grid and shift-record models, the grid layout descriptor,
//! the admin-hour configuration with its import/export rules, the
//! calculations that read it, the session context, and the CLI settings.

pub mod calculations;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod settings;
