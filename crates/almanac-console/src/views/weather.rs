use std::io::{self, Write};

use almanac_weather::WeatherReport;
use chrono::DateTime;

fn utc(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| secs.to_string())
}

pub fn render(report: &WeatherReport, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Weather for {}:", report.name)?;
    writeln!(out, "Weather Description: {}", report.condition.description)?;
    writeln!(
        out,
        "Coordinates: Lon: {}, Lat: {}",
        report.coord.lon, report.coord.lat
    )?;
    writeln!(out, "Base: {}", report.base)?;
    writeln!(out, "Temperature: {}°C", report.main.temp)?;
    writeln!(out, "Feels Like: {}°C", report.main.feels_like)?;
    writeln!(out, "Minimum Temperature: {}°C", report.main.temp_min)?;
    writeln!(out, "Maximum Temperature: {}°C", report.main.temp_max)?;
    writeln!(out, "Pressure: {}hPa", report.main.pressure)?;
    writeln!(out, "Humidity: {}%", report.main.humidity)?;
    writeln!(out, "Visibility: {}", report.visibility)?;
    writeln!(out, "Wind Speed: {}m/s", report.wind.speed)?;
    writeln!(out, "Wind Degree: {}°", report.wind.deg)?;
    writeln!(out, "Cloudiness: {}%", report.clouds)?;
    writeln!(out, "Date and Time (UTC): {}", utc(report.dt))?;
    writeln!(
        out,
        "Sys Info: Type: {}, ID: {}, Country: {}, Sunrise: {}, Sunset: {}",
        report.sys.kind,
        report.sys.id,
        report.sys.country,
        utc(report.sys.sunrise),
        utc(report.sys.sunset)
    )?;
    writeln!(out, "Timezone Offset (Sec): {}", report.timezone)?;
    writeln!(out, "City ID: {}", report.id)?;
    writeln!(out, "City Name: {}", report.name)?;
    writeln!(out, "Cod: {}", report.cod)
}
