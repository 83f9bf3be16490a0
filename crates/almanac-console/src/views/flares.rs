use std::io::{self, Write};

use almanac_weather::SolarFlare;
use chrono::{DateTime, Utc};

fn time_or_na(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.to_string()).unwrap_or_else(|| "N/A".to_string())
}

pub fn render(flares: &[SolarFlare], out: &mut impl Write) -> io::Result<()> {
    if flares.is_empty() {
        return writeln!(out, "No solar flares data available.");
    }

    writeln!(out, "Solar Flares Data:")?;
    for flare in flares {
        writeln!(out, "Flare ID: {}", flare.flare_id)?;
        writeln!(out, "Begin Time: {}", flare.begin_time)?;
        writeln!(out, "Peak Time: {}", time_or_na(flare.peak_time))?;
        writeln!(out, "End Time: {}", time_or_na(flare.end_time))?;
        writeln!(out, "Class Type: {}", flare.class_type)?;
        writeln!(
            out,
            "Source Location: {}",
            flare.source_location.as_deref().unwrap_or("N/A")
        )?;
        match flare.active_region_num {
            Some(region) => writeln!(out, "Active Region Number: {region}")?,
            None => writeln!(out, "Active Region Number: N/A")?,
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_empty() {
        let mut out = Vec::new();
        render(&[], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No solar flares data available.\n");
    }

    #[test]
    fn test_optional_fields_show_na() {
        let flare = SolarFlare {
            flare_id: "2024-05-01T06:10:00-FLR-001".into(),
            begin_time: Utc.with_ymd_and_hms(2024, 5, 1, 6, 10, 0).unwrap(),
            peak_time: None,
            end_time: None,
            class_type: "C8.4".into(),
            source_location: None,
            active_region_num: None,
        };

        let mut out = Vec::new();
        render(&[flare], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Begin Time: 2024-05-01 06:10:00 UTC"));
        assert!(text.contains("Peak Time: N/A"));
        assert!(text.contains("Class Type: C8.4"));
        assert!(text.contains("Active Region Number: N/A"));
    }
}
