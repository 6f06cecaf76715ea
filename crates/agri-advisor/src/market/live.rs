//! Live Market Data Feed
//!
//! JSON client for an external agricultural data service. The endpoint
//! shape is a plain REST API: `/prices`, `/news`, and `/weather` with
//! query parameters.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::MarketDataFeed;
use crate::config::FeedConfig;
use crate::error::{AdvisorError, Result};
use crate::model::{NewsItem, PricePoint, Timeframe, WeatherObservation};

/// Client for a configured live data feed
pub struct LiveFeed {
    client: reqwest::Client,
    base_url: String,
}

// Wire DTOs. Kept separate from the domain model so feed schema changes
// stay contained here.

#[derive(Deserialize)]
struct PriceDto {
    date: NaiveDate,
    price: Decimal,
    #[serde(default)]
    unit: Option<String>,
}

#[derive(Deserialize)]
struct NewsDto {
    date: NaiveDate,
    headline: String,
    #[serde(default)]
    source: Option<String>,
}

#[derive(Deserialize)]
struct WeatherDto {
    date: NaiveDate,
    temperature_c: f64,
    precipitation_mm: f64,
    #[serde(default)]
    horizon_days: u32,
}

impl LiveFeed {
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AdvisorError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self
            .client
            .get(format!("{}{path}", self.base_url))
            .query(query)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AdvisorError::DataUnavailable(format!(
                "feed has no data for {path}"
            )));
        }

        let response = response.error_for_status()?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl MarketDataFeed for LiveFeed {
    async fn fetch_prices(&self, crop: &str, timeframe: Timeframe) -> Result<Vec<PricePoint>> {
        let dtos: Vec<PriceDto> = self
            .get_json(
                "/prices",
                &[
                    ("crop", crop.to_lowercase()),
                    ("days", timeframe.days().to_string()),
                ],
            )
            .await?;

        let mut points: Vec<PricePoint> = dtos
            .into_iter()
            .map(|d| {
                let mut p = PricePoint::new(d.date, crop, d.price);
                if let Some(unit) = d.unit {
                    p.unit = unit;
                }
                p
            })
            .collect();
        points.sort_by_key(|p| p.date);

        Ok(points)
    }

    async fn fetch_news(&self, crop: &str, timeframe: Timeframe) -> Result<Vec<NewsItem>> {
        let dtos: Vec<NewsDto> = self
            .get_json(
                "/news",
                &[
                    ("crop", crop.to_lowercase()),
                    ("days", timeframe.days().to_string()),
                ],
            )
            .await?;

        Ok(dtos
            .into_iter()
            .map(|d| NewsItem {
                date: d.date,
                crops: vec![crop.to_lowercase()],
                headline: d.headline,
                source: d.source.unwrap_or_else(|| "unknown".into()),
            })
            .collect())
    }

    async fn fetch_weather(
        &self,
        region: &str,
        horizon_days: u32,
    ) -> Result<Vec<WeatherObservation>> {
        let dtos: Vec<WeatherDto> = self
            .get_json(
                "/weather",
                &[
                    ("region", region.to_lowercase()),
                    ("days", horizon_days.to_string()),
                ],
            )
            .await?;

        Ok(dtos
            .into_iter()
            .map(|d| WeatherObservation {
                date: d.date,
                region: region.to_lowercase(),
                temperature_c: d.temperature_c,
                precipitation_mm: d.precipitation_mm,
                horizon_days: d.horizon_days,
            })
            .collect())
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!("live feed health check failed: {}", e);
                false
            }
        }
    }

    fn name(&self) -> &str {
        "live"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let feed = LiveFeed::new(&FeedConfig {
            base_url: "https://feed.example.com/".into(),
            timeout_secs: 30,
        })
        .unwrap();
        assert_eq!(feed.base_url, "https://feed.example.com");
    }
}
