//! The report sections and the order they run in.

use std::io::{BufRead, Write};

use almanac_core::{AppConfig, AppError, Settings};
use almanac_vault::SecretVault;
use almanac_weather::{HttpFetcher, OpenWeatherClient, SolarFlareClient, TidesClient, UvClient};
use chrono::NaiveDate;

use crate::keys::{self, ApiKeyEntry};
use crate::{prompt, views};

pub const DEFAULT_CITY: &str = "Takanini";

pub const TIDES_LATITUDE: f64 = -37.406;
pub const TIDES_LONGITUDE: f64 = 175.947;

pub const DEFAULT_UV_LATITUDE: f64 = -39.0;
pub const DEFAULT_UV_LONGITUDE: f64 = 174.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Weather,
    Tides,
    Hunting,
    UvIndex,
    SolarFlares,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Weather,
        Section::Tides,
        Section::Hunting,
        Section::UvIndex,
        Section::SolarFlares,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Weather => "Current Weather",
            Section::Tides => "Tides",
            Section::Hunting => "Hunting Seasons",
            Section::UvIndex => "UV Index",
            Section::SolarFlares => "Solar Flares",
        }
    }
}

/// Fixed date windows for the tides and solar flare reports.
#[derive(Debug, Clone, Copy)]
pub struct DateWindows {
    pub tides: (NaiveDate, NaiveDate),
    pub solar_flares: (NaiveDate, NaiveDate),
}

impl Default for DateWindows {
    fn default() -> Self {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
        Self {
            tides: (date(2023, 1, 1), date(2023, 12, 31)),
            solar_flares: (date(2024, 5, 1), date(2024, 5, 2)),
        }
    }
}

/// Runs the report sections against one input/output pair.
pub struct ReportRunner<'a, R, W> {
    config: &'a AppConfig,
    settings: &'a Settings,
    vault: &'a SecretVault,
    http: HttpFetcher,
    windows: DateWindows,
    input: R,
    out: W,
}

impl<'a, R: BufRead, W: Write> ReportRunner<'a, R, W> {
    pub fn new(
        config: &'a AppConfig,
        settings: &'a Settings,
        vault: &'a SecretVault,
        http: HttpFetcher,
        input: R,
        out: W,
    ) -> Self {
        Self {
            config,
            settings,
            vault,
            http,
            windows: DateWindows::default(),
            input,
            out,
        }
    }

    pub fn with_windows(mut self, windows: DateWindows) -> Self {
        self.windows = windows;
        self
    }

    /// Run every section in order. A failing section is logged and reported
    /// and the next one still runs. Returns the number of failed sections.
    pub async fn run_all(&mut self) -> Result<usize, AppError> {
        let mut failures = 0;
        for section in Section::ALL {
            views::banner(&mut self.out, section.title())?;
            if let Err(e) = self.run(section).await {
                failures += 1;
                tracing::error!(section = section.title(), "Report failed: {}", e);
                writeln!(self.out, "{}", e.user_message())?;
            }
        }
        self.out.flush()?;
        Ok(failures)
    }

    pub async fn run(&mut self, section: Section) -> Result<(), AppError> {
        match section {
            Section::Weather => self.weather().await,
            Section::Tides => self.tides().await,
            Section::Hunting => self.hunting(),
            Section::UvIndex => self.uv_index().await,
            Section::SolarFlares => self.solar_flares().await,
        }
    }

    fn api_key(&mut self, entry: &ApiKeyEntry) -> Result<Option<String>, AppError> {
        let resolved =
            keys::resolve_api_key(entry, self.vault, self.settings, &mut self.input, &mut self.out)?;
        Ok(resolved.map(|(_, key)| key))
    }

    pub async fn weather(&mut self) -> Result<(), AppError> {
        let Some(api_key) = self.api_key(&keys::WEATHER)? else {
            return Ok(());
        };
        let city = prompt::ask_or_default(
            &mut self.input,
            &mut self.out,
            "Enter a city name",
            DEFAULT_CITY,
        )?;

        let client =
            OpenWeatherClient::new(self.http.clone(), &api_key, &self.config.weather_base_url);
        let report = client.fetch(&city).await?;
        views::weather::render(&report, &mut self.out)?;
        Ok(())
    }

    pub async fn tides(&mut self) -> Result<(), AppError> {
        let Some(api_key) = self.api_key(&keys::TIDES)? else {
            return Ok(());
        };

        let mut client = TidesClient::new(self.http.clone(), &api_key, &self.config.tides_base_url);
        if let Some(dir) = &self.config.tide_archive_dir {
            client = client.with_archive_dir(dir);
        }

        let (start, end) = self.windows.tides;
        let range = client
            .fetch_range(TIDES_LATITUDE, TIDES_LONGITUDE, start, end)
            .await?;
        views::tides::render(&range, &mut self.out)?;
        Ok(())
    }

    pub fn hunting(&mut self) -> Result<(), AppError> {
        let seasons = almanac_seasons::parse_file(&self.config.hunting_data_path)?;
        views::hunting::render(&seasons, &mut self.out)?;
        Ok(())
    }

    pub async fn uv_index(&mut self) -> Result<(), AppError> {
        let Some(api_key) = self.api_key(&keys::UV_INDEX)? else {
            return Ok(());
        };
        let lat = prompt::ask_f64(
            &mut self.input,
            &mut self.out,
            "Enter latitude",
            DEFAULT_UV_LATITUDE,
        )?;
        let lon = prompt::ask_f64(
            &mut self.input,
            &mut self.out,
            "Enter longitude",
            DEFAULT_UV_LONGITUDE,
        )?;

        let client = UvClient::new(self.http.clone(), &api_key, &self.config.uv_index_base_url);
        let report = client.fetch(lat, lon).await?;
        views::uv::render(&report, &mut self.out)?;
        Ok(())
    }

    pub async fn solar_flares(&mut self) -> Result<(), AppError> {
        let Some(api_key) = self.api_key(&keys::SOLAR_FLARE)? else {
            return Ok(());
        };

        let client = SolarFlareClient::new(
            self.http.clone(),
            &api_key,
            &self.config.solar_flare_base_url,
        );
        let (start, end) = self.windows.solar_flares;
        let flares = client.fetch(start, end).await?;
        views::flares::render(&flares, &mut self.out)?;
        Ok(())
    }

    /// Hand back the output sink.
    pub fn into_output(self) -> W {
        self.out
    }
}
