//! Plain-text renderers, one per report.
//!
//! Every renderer writes to any `io::Write`; the binary passes locked stdout
//! and tests pass a `Vec<u8>`.

pub mod flares;
pub mod hunting;
pub mod tides;
pub mod uv;
pub mod weather;

use std::io::{self, Write};

/// Values shown per tide or UV series.
pub const MAX_VALUES_SHOWN: usize = 10;

/// Section heading printed before each report.
pub fn banner(out: &mut impl Write, title: &str) -> io::Result<()> {
    let rule = "=".repeat(title.chars().count() + 8);
    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "    {title}")?;
    writeln!(out, "{rule}")
}
