//! Tide predictions from the NIWA tides API.
//!
//! The API serves at most one month per request, so a date range is
//! downloaded month by month and merged. A month that fails is recorded and
//! the walk moves on.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{ParseError, ProviderError};
use crate::http::HttpFetcher;

const PROVIDER: &str = "NIWA Tides";
const DATUM: &str = "MSL";
const HEIGHT: &str = "MSL = 0m";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TideMetadata {
    pub latitude: f64,
    pub longitude: f64,
    pub datum: String,
    pub start: DateTime<Utc>,
    pub days: u32,
    #[serde(default)]
    pub interval: u32,
    #[serde(default)]
    pub height: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TideValue {
    pub time: DateTime<Utc>,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TidesData {
    #[serde(default)]
    pub metadata: Option<TideMetadata>,
    pub values: Vec<TideValue>,
}

/// Outcome of one monthly download.
#[derive(Debug)]
pub struct MonthDownload {
    pub month: NaiveDate,
    pub values: usize,
    pub error: Option<ProviderError>,
}

impl MonthDownload {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Merged tide data for a date range plus the per-month download log.
#[derive(Debug)]
pub struct TideRange {
    pub data: TidesData,
    pub months: Vec<MonthDownload>,
}

/// Parse one month's tides body.
pub fn parse(raw: &str) -> Result<TidesData, ParseError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    if value.get("values").is_none() {
        return Err(ParseError::missing("values"));
    }
    serde_json::from_value(value).map_err(|e| ParseError::invalid("values", e))
}

fn days_in_month(date: NaiveDate) -> u32 {
    let first = date.with_day(1).unwrap_or(date);
    first
        .checked_add_months(Months::new(1))
        .map(|next| next.signed_duration_since(first).num_days() as u32)
        .unwrap_or(31)
}

pub struct TidesClient {
    http: HttpFetcher,
    api_key: String,
    base_url: String,
    archive_dir: Option<PathBuf>,
}

impl TidesClient {
    pub fn new(http: HttpFetcher, api_key: &str, base_url: &str) -> Self {
        Self {
            http,
            api_key: api_key.to_string(),
            base_url: base_url.to_string(),
            archive_dir: None,
        }
    }

    /// Save each raw monthly body as `tides_YYYY_MM.json` under `dir`.
    pub fn with_archive_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.archive_dir = Some(dir.into());
        self
    }

    /// Raw JSON for the month containing `month_start`, starting on that day.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_month_raw(
        &self,
        lat: f64,
        lon: f64,
        month_start: NaiveDate,
    ) -> Result<String, ProviderError> {
        if self.api_key.trim().is_empty() {
            return Err(ProviderError::MissingApiKey(PROVIDER));
        }

        let query = [
            ("lat", lat.to_string()),
            ("long", lon.to_string()),
            ("datum", DATUM.to_string()),
            ("numberOfDays", days_in_month(month_start).to_string()),
            ("apikey", self.api_key.clone()),
            ("startDate", month_start.format("%Y-%m-%d").to_string()),
        ];
        Ok(self.http.get_text(&self.base_url, &query, &[]).await?)
    }

    /// Download every month from `start` through `end` and merge the values.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_range(
        &self,
        lat: f64,
        lon: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<TideRange, ProviderError> {
        if self.api_key.trim().is_empty() {
            return Err(ProviderError::MissingApiKey(PROVIDER));
        }
        if start > end {
            return Err(ProviderError::InvalidRequest(format!(
                "start date {start} is after end date {end}"
            )));
        }

        let days = end.signed_duration_since(start).num_days() as u32 + 1;
        let mut data = TidesData {
            metadata: Some(TideMetadata {
                latitude: lat,
                longitude: lon,
                datum: DATUM.to_string(),
                start: start.and_time(chrono::NaiveTime::MIN).and_utc(),
                days,
                interval: 0,
                height: HEIGHT.to_string(),
            }),
            values: Vec::new(),
        };
        let mut months = Vec::new();

        let mut current = start;
        while current <= end {
            let outcome = match self.fetch_month_raw(lat, lon, current).await {
                Ok(raw) => {
                    self.archive(current, &raw);
                    parse(&raw).map_err(ProviderError::from)
                }
                Err(e) => Err(e),
            };

            match outcome {
                Ok(month) => {
                    tracing::debug!("Tides {}: {} values", current.format("%Y-%m"), month.values.len());
                    months.push(MonthDownload {
                        month: current,
                        values: month.values.len(),
                        error: None,
                    });
                    data.values.extend(month.values);
                }
                Err(e) => {
                    tracing::warn!("Tides download for {} failed: {}", current.format("%Y-%m"), e);
                    months.push(MonthDownload {
                        month: current,
                        values: 0,
                        error: Some(e),
                    });
                }
            }

            current = match current.checked_add_months(Months::new(1)) {
                Some(next) => next,
                None => break,
            };
        }

        Ok(TideRange { data, months })
    }

    fn archive(&self, month: NaiveDate, raw: &str) {
        let Some(dir) = &self.archive_dir else {
            return;
        };
        let path = archive_path(dir, month);
        let written = std::fs::create_dir_all(dir).and_then(|_| std::fs::write(&path, raw));
        if let Err(e) = written {
            tracing::warn!("Could not archive tides to {}: {}", path.display(), e);
        }
    }
}

fn archive_path(dir: &Path, month: NaiveDate) -> PathBuf {
    dir.join(format!("tides_{}_{:02}.json", month.year(), month.month()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(date(2023, 1, 1)), 31);
        assert_eq!(days_in_month(date(2023, 2, 14)), 28);
        assert_eq!(days_in_month(date(2024, 2, 1)), 29);
        assert_eq!(days_in_month(date(2023, 4, 30)), 30);
        assert_eq!(days_in_month(date(2023, 12, 1)), 31);
    }

    #[test]
    fn test_parse_month() {
        let raw = r#"{
            "metadata": { "latitude": -37.406, "longitude": 175.947, "datum": "MSL",
                          "start": "2023-01-01T00:00:00Z", "days": 31, "interval": 0, "height": "MSL = 0m" },
            "values": [
                { "time": "2023-01-01T03:12:00Z", "value": 1.21 },
                { "time": "2023-01-01T09:30:00Z", "value": -1.05 }
            ]
        }"#;
        let data = parse(raw).unwrap();

        assert_eq!(data.values.len(), 2);
        assert_eq!(data.values[1].value, -1.05);
        assert_eq!(data.metadata.unwrap().days, 31);
    }

    #[test]
    fn test_parse_without_metadata() {
        let data = parse(r#"{ "values": [] }"#).unwrap();
        assert!(data.metadata.is_none());
        assert!(data.values.is_empty());
    }

    #[test]
    fn test_parse_missing_values() {
        let err = parse(r#"{ "metadata": null }"#).unwrap_err();
        assert!(matches!(err, ParseError::MissingField(ref f) if f == "values"));
    }

    #[test]
    fn test_parse_bad_time() {
        let err = parse(r#"{ "values": [{ "time": "yesterday", "value": 1.0 }] }"#).unwrap_err();
        assert!(matches!(err, ParseError::InvalidField { .. }));
    }

    #[test]
    fn test_archive_path() {
        let path = archive_path(Path::new("out"), date(2023, 3, 1));
        assert_eq!(path, Path::new("out").join("tides_2023_03.json"));
    }
}
