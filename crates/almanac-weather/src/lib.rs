//! Public data providers for Almanac
//!
//! One client per API (OpenWeatherMap, NIWA tides, NIWA UV, NASA DONKI solar
//! flares) over a shared [`HttpFetcher`], each with a `parse` function that
//! turns the raw body into a model.

pub mod error;
mod error_mapping;
pub mod http;
pub mod openweather;
pub mod solar_flare;
pub mod tides;
pub mod uv;

pub use error::{ParseError, ProviderError};
pub use http::HttpFetcher;
pub use openweather::{OpenWeatherClient, WeatherReport};
pub use solar_flare::{SolarFlare, SolarFlareClient};
pub use tides::{MonthDownload, TideRange, TidesClient, TidesData};
pub use uv::{UvClient, UvReport};
