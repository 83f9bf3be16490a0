//! Solar flare events from NASA's DONKI FLR endpoint.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{ParseError, ProviderError};
use crate::http::HttpFetcher;

const PROVIDER: &str = "NASA DONKI";

/// DONKI's own timestamp form, e.g. `2024-05-01T00:49Z`.
const DONKI_TIME_FORMAT: &str = "%Y-%m-%dT%H:%MZ";

#[derive(Debug, Clone, PartialEq)]
pub struct SolarFlare {
    pub flare_id: String,
    pub begin_time: DateTime<Utc>,
    pub peak_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub class_type: String,
    pub source_location: Option<String>,
    pub active_region_num: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiFlare {
    #[serde(rename = "flrID")]
    flr_id: Option<String>,
    begin_time: Option<String>,
    peak_time: Option<String>,
    end_time: Option<String>,
    class_type: Option<String>,
    source_location: Option<String>,
    active_region_num: Option<i64>,
}

fn parse_time(field: &str, raw: &str) -> Result<DateTime<Utc>, ParseError> {
    let raw = raw.trim();
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, DONKI_TIME_FORMAT) {
        return Ok(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ParseError::invalid(field, format!("{raw:?}: {e}")))
}

fn optional_time(field: &str, raw: Option<String>) -> Result<Option<DateTime<Utc>>, ParseError> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_time(field, s).map(Some),
    }
}

/// Parse a DONKI FLR body (a JSON array of flares).
///
/// An empty body means no flares in the window.
pub fn parse(raw: &str) -> Result<Vec<SolarFlare>, ParseError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let value: serde_json::Value = serde_json::from_str(raw)?;
    if !value.is_array() {
        return Err(ParseError::invalid("flares", "expected a JSON array"));
    }
    let api: Vec<ApiFlare> =
        serde_json::from_value(value).map_err(|e| ParseError::invalid("flares", e))?;

    api.into_iter()
        .enumerate()
        .map(|(i, flare)| -> Result<SolarFlare, ParseError> {
            let field = |name: &str| format!("[{i}].{name}");

            let flare_id = flare.flr_id.ok_or_else(|| ParseError::missing(field("flrID")))?;
            let begin_raw = flare
                .begin_time
                .ok_or_else(|| ParseError::missing(field("beginTime")))?;
            let class_type = flare
                .class_type
                .ok_or_else(|| ParseError::missing(field("classType")))?;

            Ok(SolarFlare {
                flare_id,
                begin_time: parse_time(&field("beginTime"), &begin_raw)?,
                peak_time: optional_time(&field("peakTime"), flare.peak_time)?,
                end_time: optional_time(&field("endTime"), flare.end_time)?,
                class_type,
                source_location: flare.source_location.filter(|s| !s.trim().is_empty()),
                active_region_num: flare.active_region_num,
            })
        })
        .collect()
}

pub struct SolarFlareClient {
    http: HttpFetcher,
    api_key: String,
    base_url: String,
}

impl SolarFlareClient {
    pub fn new(http: HttpFetcher, api_key: &str, base_url: &str) -> Self {
        Self {
            http,
            api_key: api_key.to_string(),
            base_url: base_url.to_string(),
        }
    }

    /// Raw JSON for flares between two dates, inclusive.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_raw(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<String, ProviderError> {
        if self.api_key.trim().is_empty() {
            return Err(ProviderError::MissingApiKey(PROVIDER));
        }
        if start_date > end_date {
            return Err(ProviderError::InvalidRequest(format!(
                "start date {start_date} is after end date {end_date}"
            )));
        }

        let query = [
            ("startDate", start_date.format("%Y-%m-%d").to_string()),
            ("endDate", end_date.format("%Y-%m-%d").to_string()),
            ("api_key", self.api_key.clone()),
        ];
        Ok(self.http.get_text(&self.base_url, &query, &[]).await?)
    }

    pub async fn fetch(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<SolarFlare>, ProviderError> {
        let raw = self.fetch_raw(start_date, end_date).await?;
        Ok(parse(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const TWO_FLARES: &str = r#"[
        {
            "flrID": "2024-05-01T00:49:00-FLR-001",
            "instruments": [{ "displayName": "GOES-P: EXIS 1.0-8.0" }],
            "beginTime": "2024-05-01T00:49Z",
            "peakTime": "2024-05-01T01:03Z",
            "endTime": "2024-05-01T01:09Z",
            "classType": "M1.1",
            "sourceLocation": "N25E51",
            "activeRegionNum": 13664,
            "linkedEvents": null
        },
        {
            "flrID": "2024-05-01T06:10:00-FLR-001",
            "beginTime": "2024-05-01T06:10Z",
            "peakTime": null,
            "endTime": null,
            "classType": "C8.4",
            "sourceLocation": "",
            "activeRegionNum": null
        }
    ]"#;

    #[test]
    fn test_parse_flares() {
        let flares = parse(TWO_FLARES).unwrap();

        assert_eq!(flares.len(), 2);
        assert_eq!(flares[0].class_type, "M1.1");
        assert_eq!(
            flares[0].begin_time,
            Utc.with_ymd_and_hms(2024, 5, 1, 0, 49, 0).unwrap()
        );
        assert_eq!(flares[0].active_region_num, Some(13664));
        assert_eq!(flares[0].source_location.as_deref(), Some("N25E51"));

        assert!(flares[1].peak_time.is_none());
        assert!(flares[1].source_location.is_none());
        assert!(flares[1].active_region_num.is_none());
    }

    #[test]
    fn test_rfc3339_times_accepted() {
        let raw = r#"[{ "flrID": "x", "beginTime": "2024-05-01T00:49:30+00:00", "classType": "X1.0" }]"#;
        let flares = parse(raw).unwrap();
        assert_eq!(
            flares[0].begin_time,
            Utc.with_ymd_and_hms(2024, 5, 1, 0, 49, 30).unwrap()
        );
    }

    #[test]
    fn test_empty_body_and_empty_array() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("[]").unwrap().is_empty());
    }

    #[test]
    fn test_missing_class_type_names_index() {
        let raw = r#"[{ "flrID": "x", "beginTime": "2024-05-01T00:49Z" }]"#;
        let err = parse(raw).unwrap_err();
        assert!(matches!(err, ParseError::MissingField(ref f) if f == "[0].classType"));
    }

    #[test]
    fn test_bad_time_is_invalid_field() {
        let raw = r#"[{ "flrID": "x", "beginTime": "May 1st", "classType": "C1.0" }]"#;
        let err = parse(raw).unwrap_err();
        assert!(matches!(err, ParseError::InvalidField { ref field, .. } if field == "[0].beginTime"));
    }

    #[test]
    fn test_object_body_rejected() {
        let err = parse(r#"{ "error": "rate limited" }"#).unwrap_err();
        assert!(matches!(err, ParseError::InvalidField { .. }));
    }
}
