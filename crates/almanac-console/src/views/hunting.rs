use std::io::{self, Write};

use almanac_seasons::HuntingSeason;

pub fn render(seasons: &[HuntingSeason], out: &mut impl Write) -> io::Result<()> {
    if seasons.is_empty() {
        return writeln!(out, "No hunting season data available.");
    }

    writeln!(out, "Hunting Season Data:")?;
    writeln!(out, "--------------------")?;
    for season in seasons {
        writeln!(out, "Species: {}", season.species)?;
        writeln!(out, "Hunting Dates: {}", season.hunting_dates)?;
        if !season.notes.is_empty() {
            writeln!(out, "Notes: {}", season.notes)?;
        }
        writeln!(out)?;
    }
    Ok(())
}
