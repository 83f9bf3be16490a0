//! UV index forecasts from the NIWA UV API.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{ParseError, ProviderError};
use crate::http::HttpFetcher;

const PROVIDER: &str = "NIWA UV";
const API_KEY_HEADER: &str = "x-apikey";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UvValue {
    pub time: DateTime<Utc>,
    pub value: f64,
}

/// One forecast series, e.g. clear-sky or cloudy UV.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UvProduct {
    pub name: String,
    #[serde(default)]
    pub values: Vec<UvValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UvReport {
    /// Coordinates as reported by the service
    pub coord: String,
    pub products: Vec<UvProduct>,
}

#[derive(Debug, Deserialize)]
struct ApiUv {
    coord: Option<serde_json::Value>,
    products: Option<Vec<UvProduct>>,
}

/// Parse a UV forecast body.
pub fn parse(raw: &str) -> Result<UvReport, ParseError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let api: ApiUv =
        serde_json::from_value(value).map_err(|e| ParseError::invalid("products", e))?;

    let coord = match api.coord {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Null) | None => return Err(ParseError::missing("coord")),
        Some(other) => other.to_string(),
    };
    let products = api.products.ok_or_else(|| ParseError::missing("products"))?;

    Ok(UvReport { coord, products })
}

pub struct UvClient {
    http: HttpFetcher,
    api_key: String,
    base_url: String,
}

impl UvClient {
    pub fn new(http: HttpFetcher, api_key: &str, base_url: &str) -> Self {
        Self {
            http,
            api_key: api_key.to_string(),
            base_url: base_url.to_string(),
        }
    }

    /// Raw JSON for a location. The key travels in the `x-apikey` header.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_raw(&self, lat: f64, lon: f64) -> Result<String, ProviderError> {
        if self.api_key.trim().is_empty() {
            return Err(ProviderError::MissingApiKey(PROVIDER));
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(ProviderError::InvalidRequest(format!(
                "coordinates out of range: {lat}, {lon}"
            )));
        }

        let query = [("lat", lat.to_string()), ("long", lon.to_string())];
        let headers = [(API_KEY_HEADER, self.api_key.as_str())];
        Ok(self.http.get_text(&self.base_url, &query, &headers).await?)
    }

    pub async fn fetch(&self, lat: f64, lon: f64) -> Result<UvReport, ProviderError> {
        let raw = self.fetch_raw(lat, lon).await?;
        Ok(parse(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_products() {
        let raw = r#"{
            "coord": "EPSG:4326,-39.0,174.0",
            "products": [
                { "name": "cloudy_sky_uv_index", "values": [
                    { "time": "2024-05-25T00:00:00.000Z", "value": 0.4 },
                    { "time": "2024-05-25T01:00:00.000Z", "value": 1.2 }
                ] },
                { "name": "clear_sky_uv_index", "values": [] }
            ]
        }"#;
        let report = parse(raw).unwrap();

        assert_eq!(report.coord, "EPSG:4326,-39.0,174.0");
        assert_eq!(report.products.len(), 2);
        assert_eq!(report.products[0].values[1].value, 1.2);
        assert!(report.products[1].values.is_empty());
    }

    #[test]
    fn test_object_coord_is_kept_as_text() {
        let raw = r#"{ "coord": { "lat": -39.0, "lon": 174.0 }, "products": [] }"#;
        let report = parse(raw).unwrap();
        assert!(report.coord.contains("174"));
    }

    #[test]
    fn test_missing_fields() {
        let err = parse(r#"{ "products": [] }"#).unwrap_err();
        assert!(matches!(err, ParseError::MissingField(ref f) if f == "coord"));

        let err = parse(r#"{ "coord": "x" }"#).unwrap_err();
        assert!(matches!(err, ParseError::MissingField(ref f) if f == "products"));
    }
}
