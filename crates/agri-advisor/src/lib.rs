//! # agri-advisor
//!
//! Agricultural market advisory engine: price history, news sentiment, and
//! weather forecasts go in, a crop-marketing recommendation comes out.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌───────────────────────────┐   ┌──────────┐
//! │ DataProvider │──▶│ Trend / Sentiment / Weather│──▶│ Composer │──▶ LLM
//! │ (live|synth) │   │        analyzers           │   │ (prompt) │
//! └──────────────┘   └───────────────────────────┘   └──────────┘
//! ```
//!
//! The provider falls back to deterministic synthetic data when no live
//! feed is configured, so the full pipeline runs offline. Analyzers are
//! pure and individually testable; only the LLM call at the end has
//! network effects.

pub mod advisory;
pub mod analysis;
pub mod config;
pub mod error;
pub mod market;
pub mod model;

pub use advisory::{compose, render_prompt, Advisor, ADVISOR_SYSTEM_PROMPT};
pub use analysis::{SentimentAnalyzer, TrendAnalyzer, WeatherImpactEstimator};
pub use config::AdvisorConfig;
pub use error::{AdvisorError, Result};
pub use market::{DataProvider, LiveFeed, MarketDataFeed, MarketSnapshot, SyntheticFeed};
pub use model::{
    AdvisoryRequest, AdvisoryResponse, ImpactRating, ImpactResult, NewsItem, PricePoint,
    SentimentLabel, SentimentResult, Timeframe, TrendDirection, TrendResult, WeatherObservation,
};
