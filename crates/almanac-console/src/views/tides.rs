use std::io::{self, Write};

use almanac_weather::TideRange;

use super::MAX_VALUES_SHOWN;

pub fn render(range: &TideRange, out: &mut impl Write) -> io::Result<()> {
    for download in &range.months {
        writeln!(out, "Downloading {}", download.month.format("%b %Y"))?;
        if let Some(error) = &download.error {
            writeln!(
                out,
                "An error occurred while downloading tides data: {}",
                error
            )?;
        }
    }
    writeln!(out, "Done")?;

    writeln!(out, "Tides Data:")?;
    if let Some(metadata) = &range.data.metadata {
        writeln!(out, "\nMetadata:")?;
        writeln!(out, "Latitude: {}", metadata.latitude)?;
        writeln!(out, "Longitude: {}", metadata.longitude)?;
        writeln!(out, "Datum: {}", metadata.datum)?;
        writeln!(out, "Start Date: {}", metadata.start.format("%Y-%m-%d"))?;
        writeln!(out, "Number of Days: {}", metadata.days)?;
        writeln!(out, "Interval: {}", metadata.interval)?;
        writeln!(out, "Height: {}", metadata.height)?;
    }

    writeln!(out, "\nTide Values:")?;
    for value in range.data.values.iter().take(MAX_VALUES_SHOWN) {
        writeln!(out, "Time: {}, Value: {}", value.time, value.value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use almanac_core::NetworkError;
    use almanac_weather::tides::{TideMetadata, TideValue};
    use almanac_weather::{MonthDownload, ProviderError, TidesData};
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    #[test]
    fn test_render_shows_progress_and_first_ten_values() {
        let start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let values = (0..15)
            .map(|i| TideValue {
                time: start + Duration::hours(6 * i),
                value: i as f64 / 10.0,
            })
            .collect();
        let range = TideRange {
            data: TidesData {
                metadata: Some(TideMetadata {
                    latitude: -37.406,
                    longitude: 175.947,
                    datum: "MSL".into(),
                    start,
                    days: 59,
                    interval: 0,
                    height: "MSL = 0m".into(),
                }),
                values,
            },
            months: vec![
                MonthDownload {
                    month: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                    values: 15,
                    error: None,
                },
                MonthDownload {
                    month: NaiveDate::from_ymd_opt(2023, 2, 1).unwrap(),
                    values: 0,
                    error: Some(ProviderError::Network(NetworkError::Timeout)),
                },
            ],
        };

        let mut out = Vec::new();
        render(&range, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Downloading Jan 2023\nDownloading Feb 2023\n"));
        assert!(text.contains("An error occurred while downloading tides data: Request timed out"));
        assert!(text.contains("Number of Days: 59"));
        assert!(text.contains("Height: MSL = 0m"));
        assert_eq!(text.matches("Time: ").count(), 10);
        assert!(text.contains("Value: 0.9"));
        assert!(!text.contains("Value: 1.1"));
    }
}
