//! Market Data
//!
//! Abstractions and implementations for agricultural market data sources.

mod live;
mod provider;
mod synthetic;

pub use live::LiveFeed;
pub use provider::{DataProvider, MarketSnapshot};
pub use synthetic::SyntheticFeed;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{NewsItem, PricePoint, Timeframe, WeatherObservation};

/// Market data source trait (Strategy pattern)
///
/// Implement this for each source: a live commodity feed, a broker API,
/// or the deterministic synthetic generator.
#[async_trait]
pub trait MarketDataFeed: Send + Sync {
    /// Historical prices for a crop over the analysis window, oldest first
    async fn fetch_prices(&self, crop: &str, timeframe: Timeframe) -> Result<Vec<PricePoint>>;

    /// News items mentioning a crop over the analysis window
    async fn fetch_news(&self, crop: &str, timeframe: Timeframe) -> Result<Vec<NewsItem>>;

    /// Weather forecast entries for a region, `horizon_days` ahead
    async fn fetch_weather(
        &self,
        region: &str,
        horizon_days: u32,
    ) -> Result<Vec<WeatherObservation>>;

    /// Check if the source is available
    async fn health_check(&self) -> bool;

    /// Source name
    fn name(&self) -> &str;
}
