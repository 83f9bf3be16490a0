//! Console front end for Almanac
//!
//! Prompts on stdin, prints reports on stdout, and keeps provider API keys
//! in the encrypted vault.

pub mod keys;
pub mod prompt;
pub mod reports;
pub mod views;

pub use reports::{DateWindows, ReportRunner, Section};
