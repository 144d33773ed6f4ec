//! Current weather for Taiwanese cities via the Open-Meteo forecast API.

use crate::error::Result;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const WEATHER_TIMEOUT: Duration = Duration::from_secs(10);

/// Supported cities and their (latitude, longitude).
pub const CITY_COORDINATES: &[(&str, f64, f64)] = &[
    ("台北", 25.0330, 121.5654),
    ("新北", 25.1124, 121.6062),
    ("桃園", 24.9700, 121.5350),
    ("台中", 24.1477, 120.6736),
    ("台南", 22.9964, 120.2271),
    ("高雄", 22.6272, 120.3014),
    ("基隆", 25.1141, 121.7181),
    ("新竹", 24.8165, 120.9636),
    ("嘉義", 23.4789, 120.4605),
    ("宜蘭", 24.7019, 121.7817),
    ("苗栗", 24.7200, 120.5836),
    ("南投", 24.1648, 120.5921),
    ("彰化", 24.0401, 120.6423),
    ("雲林", 23.5401, 120.5049),
    ("嘉義縣", 23.4701, 120.5005),
    ("屏東", 22.7931, 120.6511),
    ("花蓮", 23.9605, 121.5906),
    ("台東", 22.9975, 121.5594),
    ("澎湖", 23.3576, 120.4531),
    ("金門", 24.4399, 118.5882),
    ("連江", 22.7723, 118.2144),
];

#[must_use]
pub fn city_coordinates(city: &str) -> Option<(f64, f64)> {
    CITY_COORDINATES
        .iter()
        .find(|(name, _, _)| *name == city)
        .map(|&(_, lat, lon)| (lat, lon))
}

pub fn supported_cities() -> impl Iterator<Item = &'static str> {
    CITY_COORDINATES.iter().map(|(name, _, _)| *name)
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    current_weather: CurrentWeather,
}

#[derive(Debug, Default, Deserialize)]
struct CurrentWeather {
    #[serde(default)]
    temperature: Option<f64>,
    #[serde(default)]
    weathercode: Option<i64>,
}

fn format_weather(city: &str, current: &CurrentWeather) -> String {
    // `{:?}` keeps the decimal on whole values (`20.0`, not `20`).
    let temperature = current
        .temperature
        .map_or_else(|| "N/A".to_string(), |t| format!("{t:?}"));
    let code = current.weathercode.unwrap_or(0);
    format!("{city}目前氣溫約{temperature}°C,天氣代碼{code}")
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
}

impl WeatherClient {
    /// `base_url` is the forecast endpoint (normally [`DEFAULT_WEATHER_BASE_URL`]).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(WEATHER_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Describe the current weather in `city`.
    ///
    /// Unsupported cities are answered without touching the network. Lookup failures come back
    /// as `查詢失敗:<detail>`.
    pub async fn get_weather(&self, city: &str) -> String {
        let Some((lat, lon)) = city_coordinates(city) else {
            return format!("不支援的城市:{city},只支援台灣的城市");
        };

        match self.current_weather(lat, lon).await {
            Ok(current) => format_weather(city, &current),
            Err(e) => {
                tracing::warn!(city, error = %e, "weather lookup failed");
                format!("查詢失敗:{e}")
            }
        }
    }

    async fn current_weather(&self, lat: f64, lon: f64) -> Result<CurrentWeather> {
        let resp = self
            .http
            .get(&self.base_url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("current_weather", "true".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;
        let body: ForecastResponse = resp.json().await?;
        Ok(body.current_weather)
    }
}
