//! Data Provider
//!
//! Front door for market data: tries the live feed when one is
//! configured and falls back to the deterministic synthetic generator,
//! so the advisory pipeline always sees one capability.

use chrono::Utc;

use super::{LiveFeed, MarketDataFeed, SyntheticFeed};
use crate::config::AdvisorConfig;
use crate::error::{AdvisorError, Result};
use crate::model::{NewsItem, PricePoint, Timeframe, WeatherObservation};

/// Forecast horizon requested from the weather source
pub const WEATHER_HORIZON_DAYS: u32 = 14;

/// Everything the analyzers need for one advisory request
#[derive(Clone, Debug)]
pub struct MarketSnapshot {
    pub crop: String,
    pub timeframe: Timeframe,
    pub prices: Vec<PricePoint>,
    pub news: Vec<NewsItem>,
    pub weather: Vec<WeatherObservation>,
    /// Name of the feed the prices came from
    pub source: String,
}

/// Market data provider with synthetic fallback
pub struct DataProvider {
    live: Option<LiveFeed>,
    synthetic: SyntheticFeed,
    default_region: String,
}

impl DataProvider {
    pub fn new(config: &AdvisorConfig) -> Result<Self> {
        let live = match &config.feed {
            Some(feed_config) => Some(LiveFeed::new(feed_config)?),
            None => None,
        };

        Ok(Self {
            live,
            synthetic: SyntheticFeed::new(config.clone()),
            default_region: config.default_region.clone(),
        })
    }

    /// Whether a live feed is configured
    pub fn has_live_feed(&self) -> bool {
        self.live.is_some()
    }

    /// Fetch prices, news, and weather for one advisory request.
    ///
    /// `refresh` forces one more live attempt even if the previous call
    /// in this process fell back; there is no further retry logic.
    pub async fn fetch(
        &self,
        crop: &str,
        timeframe: Timeframe,
        refresh: bool,
    ) -> Result<MarketSnapshot> {
        if let Some(live) = &self.live {
            let mut attempts = if refresh { 2 } else { 1 };
            while attempts > 0 {
                attempts -= 1;
                match self.fetch_from(live, crop, timeframe).await {
                    Ok(snapshot) => return Ok(snapshot),
                    Err(e) if attempts > 0 => {
                        tracing::warn!(crop, "live feed failed ({}), re-fetching once", e);
                    }
                    Err(e) => {
                        tracing::warn!(
                            crop,
                            "live feed failed ({}), falling back to synthetic data",
                            e
                        );
                    }
                }
            }
        }

        self.fetch_from(&self.synthetic, crop, timeframe).await
    }

    async fn fetch_from(
        &self,
        feed: &dyn MarketDataFeed,
        crop: &str,
        timeframe: Timeframe,
    ) -> Result<MarketSnapshot> {
        let prices = feed.fetch_prices(crop, timeframe).await?;
        if prices.is_empty() {
            return Err(AdvisorError::DataUnavailable(format!(
                "{} feed returned no prices for '{crop}' over {}",
                feed.name(),
                timeframe
            )));
        }

        let news = feed.fetch_news(crop, timeframe).await.unwrap_or_else(|e| {
            tracing::warn!("news unavailable from {}: {}", feed.name(), e);
            Vec::new()
        });

        let weather = feed
            .fetch_weather(&self.default_region, WEATHER_HORIZON_DAYS)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("weather unavailable from {}: {}", feed.name(), e);
                Vec::new()
            });

        tracing::debug!(
            crop,
            source = feed.name(),
            prices = prices.len(),
            news = news.len(),
            weather = weather.len(),
            fetched_at = %Utc::now(),
            "market snapshot assembled"
        );

        Ok(MarketSnapshot {
            crop: crop.to_lowercase(),
            timeframe,
            prices,
            news,
            weather,
            source: feed.name().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> DataProvider {
        DataProvider::new(&AdvisorConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_synthetic_only_without_feed_config() {
        let provider = provider();
        assert!(!provider.has_live_feed());

        let snapshot = provider
            .fetch("wheat", Timeframe::OneMonth, false)
            .await
            .unwrap();
        assert_eq!(snapshot.source, "synthetic");
        assert_eq!(snapshot.prices.len(), 30);
        assert_eq!(snapshot.weather.len(), WEATHER_HORIZON_DAYS as usize);
    }

    #[tokio::test]
    async fn test_repeated_fetch_is_reproducible() {
        let provider = provider();
        let a = provider
            .fetch("soybeans", Timeframe::OneWeek, false)
            .await
            .unwrap();
        let b = provider
            .fetch("soybeans", Timeframe::OneWeek, false)
            .await
            .unwrap();
        assert_eq!(a.prices, b.prices);
        assert_eq!(a.news, b.news);
    }

    #[tokio::test]
    async fn test_live_failure_falls_back_to_synthetic() {
        let mut config = AdvisorConfig::default();
        config.feed = Some(crate::config::FeedConfig {
            // nothing listens here; the connection is refused immediately
            base_url: "http://127.0.0.1:9".into(),
            timeout_secs: 1,
        });

        let provider = DataProvider::new(&config).unwrap();
        assert!(provider.has_live_feed());

        let snapshot = provider
            .fetch("wheat", Timeframe::OneWeek, true)
            .await
            .unwrap();
        assert_eq!(snapshot.source, "synthetic");
        assert_eq!(snapshot.prices.len(), 7);
    }

    #[tokio::test]
    async fn test_unknown_crop_is_terminal() {
        let provider = provider();
        let result = provider.fetch("durian", Timeframe::OneMonth, true).await;
        assert!(matches!(result, Err(AdvisorError::DataUnavailable(_))));
    }
}
