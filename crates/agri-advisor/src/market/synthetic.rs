//! Synthetic Market Data
//!
//! Deterministic generator used when no live feed is configured or the
//! live feed fails. Seeded by crop and timeframe so repeated calls return
//! identical data.

use std::collections::hash_map::DefaultHasher;
use std::f64::consts::PI;
use std::hash::{Hash, Hasher};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::MarketDataFeed;
use crate::config::AdvisorConfig;
use crate::error::{AdvisorError, Result};
use crate::model::{NewsItem, PricePoint, Timeframe, WeatherObservation};

/// Headline pool with a slot for the crop name
const HEADLINE_POOL: &[(&str, &str)] = &[
    ("Global demand for {crop} increases amid supply concerns", "AgWire"),
    ("New trade deal may boost {crop} exports", "Commodity Daily"),
    (
        "Weather conditions threaten {crop} yield in major producing regions",
        "FarmPress",
    ),
    ("{crop} prices stabilize after recent volatility", "Market Desk"),
    ("Report shows increased {crop} stockpiles", "AgWire"),
    ("Analysts predict strong {crop} market for next quarter", "Commodity Daily"),
];

/// Fraction of the base price used for trend, seasonality, and noise
const TREND_FRACTION: f64 = 0.08;
const SEASONALITY_FRACTION: f64 = 0.05;
const NOISE_FRACTION: f64 = 0.04;

/// Deterministic synthetic feed
pub struct SyntheticFeed {
    config: AdvisorConfig,
}

impl SyntheticFeed {
    pub fn new(config: AdvisorConfig) -> Self {
        Self { config }
    }

    /// Seed a generator from the request parameters. The stream tag keeps
    /// price, news, and weather sequences independent.
    fn rng_for(stream: &str, key: &str, days: u32) -> SmallRng {
        let mut hasher = DefaultHasher::new();
        stream.hash(&mut hasher);
        key.to_lowercase().hash(&mut hasher);
        days.hash(&mut hasher);
        SmallRng::seed_from_u64(hasher.finish())
    }
}

#[async_trait]
impl MarketDataFeed for SyntheticFeed {
    async fn fetch_prices(&self, crop: &str, timeframe: Timeframe) -> Result<Vec<PricePoint>> {
        let profile = self
            .config
            .crop_profile(crop)
            .ok_or_else(|| AdvisorError::DataUnavailable(format!("unknown crop '{crop}'")))?;

        let days = timeframe.days();
        let mut rng = Self::rng_for("prices", crop, days);

        let base = profile
            .base_price
            .to_f64()
            .ok_or_else(|| AdvisorError::Config("base price out of range".into()))?;
        let end_date = Utc::now().date_naive();

        let mut points = Vec::with_capacity(days as usize);
        for i in 0..days {
            let t = f64::from(i) / f64::from(days.max(2) - 1);
            let trend = base * TREND_FRACTION * t;
            let seasonality = base * SEASONALITY_FRACTION * (4.0 * PI * t).sin();
            let noise = base * NOISE_FRACTION * (rng.random::<f64>() - 0.5) * 2.0;
            let price = base + trend + seasonality + noise;

            let date = end_date - Duration::days(i64::from(days - 1 - i));
            let mut point = PricePoint::new(
                date,
                &profile.name,
                Decimal::from_f64_retain(price)
                    .unwrap_or(profile.base_price)
                    .round_dp(2),
            );
            point.unit = profile.unit.clone();
            points.push(point);
        }

        Ok(points)
    }

    async fn fetch_news(&self, crop: &str, timeframe: Timeframe) -> Result<Vec<NewsItem>> {
        // News for an unknown crop is an empty set, not an error; the
        // provider decides availability on the price series.
        let crop = crop.to_lowercase();
        let days = timeframe.days();
        let mut rng = Self::rng_for("news", &crop, days);
        let end_date = Utc::now().date_naive();

        let mut items = Vec::new();
        for i in 0..days {
            let date = end_date - Duration::days(i64::from(days - 1 - i));
            let daily_count = rng.random_range(0..=2);
            for _ in 0..daily_count {
                let (template, source) = HEADLINE_POOL[rng.random_range(0..HEADLINE_POOL.len())];
                items.push(NewsItem {
                    date,
                    crops: vec![crop.clone()],
                    headline: template.replace("{crop}", &crop),
                    source: source.into(),
                });
            }
        }

        Ok(items)
    }

    async fn fetch_weather(
        &self,
        region: &str,
        horizon_days: u32,
    ) -> Result<Vec<WeatherObservation>> {
        let mut rng = Self::rng_for("weather", region, horizon_days);
        let start_date = Utc::now().date_naive();

        let entries = (0..horizon_days)
            .map(|i| WeatherObservation {
                date: start_date + Duration::days(i64::from(i)),
                region: region.to_lowercase(),
                temperature_c: rng.random_range(15.0..30.0),
                precipitation_mm: rng.random_range(0.0..20.0),
                horizon_days: i,
            })
            .collect();

        Ok(entries)
    }

    async fn health_check(&self) -> bool {
        true // Synthetic data is always available
    }

    fn name(&self) -> &str {
        "synthetic"
    }
}
