//! Hunting season table for Almanac
//!
//! Parses the static `species,hunting dates,notes` file and answers which
//! seasons are open in a given month.

pub mod error;
mod error_mapping;
pub mod parser;
pub mod season;

pub use chrono::Month;
pub use error::{Result, SeasonsError};
pub use parser::{parse_file, parse_str};
pub use season::{search_by_month, HuntingSeason};
