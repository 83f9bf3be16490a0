//! Current conditions from the OpenWeatherMap API.

use serde::Deserialize;
use tracing::instrument;

use crate::error::{ParseError, ProviderError};
use crate::http::HttpFetcher;

const PROVIDER: &str = "OpenWeatherMap";

#[derive(Debug, Clone, PartialEq)]
pub struct Coord {
    pub lon: f64,
    pub lat: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub id: i64,
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MainReadings {
    /// °C
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// hPa
    pub pressure: i64,
    /// %
    pub humidity: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Wind {
    /// m/s
    pub speed: f64,
    pub deg: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SysInfo {
    pub kind: i64,
    pub id: i64,
    pub country: String,
    /// Unix seconds
    pub sunrise: i64,
    /// Unix seconds
    pub sunset: i64,
}

/// Current conditions for one city.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub coord: Coord,
    pub condition: Condition,
    pub base: String,
    pub main: MainReadings,
    pub visibility: i64,
    pub wind: Wind,
    /// Cloudiness %
    pub clouds: i64,
    /// Observation time, Unix seconds
    pub dt: i64,
    pub sys: SysInfo,
    /// Offset from UTC in seconds
    pub timezone: i64,
    pub id: i64,
    pub name: String,
    pub cod: i64,
}

#[derive(Debug, Deserialize)]
struct ApiWeather {
    coord: Option<ApiCoord>,
    #[serde(default)]
    weather: Vec<ApiCondition>,
    base: Option<String>,
    main: Option<ApiMain>,
    #[serde(default)]
    visibility: i64,
    wind: Option<ApiWind>,
    clouds: Option<ApiClouds>,
    #[serde(default)]
    dt: i64,
    sys: Option<ApiSys>,
    #[serde(default)]
    timezone: i64,
    #[serde(default)]
    id: i64,
    name: Option<String>,
    #[serde(default, deserialize_with = "code_from_number_or_string")]
    cod: i64,
}

#[derive(Debug, Deserialize)]
struct ApiCoord {
    #[serde(default)]
    lon: f64,
    #[serde(default)]
    lat: f64,
}

#[derive(Debug, Deserialize)]
struct ApiCondition {
    #[serde(default)]
    id: i64,
    main: Option<String>,
    description: Option<String>,
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiMain {
    #[serde(default)]
    temp: f64,
    #[serde(default)]
    feels_like: f64,
    #[serde(default)]
    temp_min: f64,
    #[serde(default)]
    temp_max: f64,
    #[serde(default)]
    pressure: i64,
    #[serde(default)]
    humidity: i64,
}

#[derive(Debug, Deserialize)]
struct ApiWind {
    #[serde(default)]
    speed: f64,
    #[serde(default)]
    deg: i64,
}

#[derive(Debug, Deserialize)]
struct ApiClouds {
    #[serde(default)]
    all: i64,
}

#[derive(Debug, Deserialize)]
struct ApiSys {
    #[serde(rename = "type", default)]
    kind: i64,
    #[serde(default)]
    id: i64,
    country: Option<String>,
    #[serde(default)]
    sunrise: i64,
    #[serde(default)]
    sunset: i64,
}

/// Error bodies carry `cod` as a string, success bodies as a number.
fn code_from_number_or_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Number(i64),
        Text(String),
    }

    Ok(match Code::deserialize(deserializer)? {
        Code::Number(n) => n,
        Code::Text(s) => s.trim().parse().unwrap_or_default(),
    })
}

/// Parse an OpenWeatherMap current-weather body.
pub fn parse(raw: &str) -> Result<WeatherReport, ParseError> {
    let api: ApiWeather = serde_json::from_str(raw)?;

    let coord = api.coord.ok_or_else(|| ParseError::missing("coord"))?;
    let condition = api
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| ParseError::missing("weather[0]"))?;
    let main = api.main.ok_or_else(|| ParseError::missing("main"))?;
    let wind = api.wind.ok_or_else(|| ParseError::missing("wind"))?;
    let clouds = api.clouds.ok_or_else(|| ParseError::missing("clouds"))?;
    let sys = api.sys.ok_or_else(|| ParseError::missing("sys"))?;

    Ok(WeatherReport {
        coord: Coord {
            lon: coord.lon,
            lat: coord.lat,
        },
        condition: Condition {
            id: condition.id,
            main: condition
                .main
                .ok_or_else(|| ParseError::missing("weather[0].main"))?,
            description: condition
                .description
                .ok_or_else(|| ParseError::missing("weather[0].description"))?,
            icon: condition
                .icon
                .ok_or_else(|| ParseError::missing("weather[0].icon"))?,
        },
        base: api.base.ok_or_else(|| ParseError::missing("base"))?,
        main: MainReadings {
            temp: main.temp,
            feels_like: main.feels_like,
            temp_min: main.temp_min,
            temp_max: main.temp_max,
            pressure: main.pressure,
            humidity: main.humidity,
        },
        visibility: api.visibility,
        wind: Wind {
            speed: wind.speed,
            deg: wind.deg,
        },
        clouds: clouds.all,
        dt: api.dt,
        sys: SysInfo {
            kind: sys.kind,
            id: sys.id,
            country: sys.country.ok_or_else(|| ParseError::missing("sys.country"))?,
            sunrise: sys.sunrise,
            sunset: sys.sunset,
        },
        timezone: api.timezone,
        id: api.id,
        name: api.name.ok_or_else(|| ParseError::missing("name"))?,
        cod: api.cod,
    })
}

pub struct OpenWeatherClient {
    http: HttpFetcher,
    api_key: String,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(http: HttpFetcher, api_key: &str, base_url: &str) -> Self {
        Self {
            http,
            api_key: api_key.to_string(),
            base_url: base_url.to_string(),
        }
    }

    /// Raw JSON for `city`, temperatures in metric units.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_raw(&self, city: &str) -> Result<String, ProviderError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(ProviderError::InvalidRequest(
                "city name cannot be empty".to_string(),
            ));
        }
        if self.api_key.trim().is_empty() {
            return Err(ProviderError::MissingApiKey(PROVIDER));
        }

        let query = [
            ("q", city.to_string()),
            ("appid", self.api_key.clone()),
            ("units", "metric".to_string()),
        ];
        Ok(self.http.get_text(&self.base_url, &query, &[]).await?)
    }

    pub async fn fetch(&self, city: &str) -> Result<WeatherReport, ProviderError> {
        let raw = self.fetch_raw(city).await?;
        Ok(parse(&raw)?)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    pub const TAKANINI: &str = r#"{
        "coord": { "lon": 174.9167, "lat": -37.05 },
        "weather": [{ "id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d" }],
        "base": "stations",
        "main": { "temp": 14.2, "feels_like": 13.6, "temp_min": 13.1, "temp_max": 15.0, "pressure": 1018, "humidity": 77 },
        "visibility": 10000,
        "wind": { "speed": 4.12, "deg": 230 },
        "clouds": { "all": 75 },
        "dt": 1716598800,
        "sys": { "type": 2, "id": 2008911, "country": "NZ", "sunrise": 1716578950, "sunset": 1716614530 },
        "timezone": 43200,
        "id": 2208330,
        "name": "Takanini",
        "cod": 200
    }"#;
}
