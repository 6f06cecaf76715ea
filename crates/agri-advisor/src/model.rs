//! Domain Models
//!
//! Core data types for the agricultural market advisor.
//! Uses `rust_decimal` for all price values - never use f64 for money!

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AdvisorError;

/// Analysis window bounding which historical records are considered
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    OneWeek,
    OneMonth,
    ThreeMonths,
}

impl Timeframe {
    /// Number of days covered by this window
    pub fn days(self) -> u32 {
        match self {
            Timeframe::OneWeek => 7,
            Timeframe::OneMonth => 30,
            Timeframe::ThreeMonths => 90,
        }
    }

    /// Human-readable label ("1 month" etc.)
    pub fn label(self) -> &'static str {
        match self {
            Timeframe::OneWeek => "1 week",
            Timeframe::OneMonth => "1 month",
            Timeframe::ThreeMonths => "3 months",
        }
    }

    /// All supported windows
    pub fn all() -> [Timeframe; 3] {
        [
            Timeframe::OneWeek,
            Timeframe::OneMonth,
            Timeframe::ThreeMonths,
        ]
    }
}

impl Default for Timeframe {
    fn default() -> Self {
        Timeframe::OneMonth
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Timeframe {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1 week" | "1w" | "week" => Ok(Timeframe::OneWeek),
            "1 month" | "1m" | "month" => Ok(Timeframe::OneMonth),
            "3 months" | "3m" => Ok(Timeframe::ThreeMonths),
            other => Err(AdvisorError::Config(format!(
                "unknown timeframe '{other}' (expected '1 week', '1 month', or '3 months')"
            ))),
        }
    }
}

/// A single historical price observation. Ordered chronologically and
/// immutable once recorded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub crop: String,
    pub price: Decimal,
    pub unit: String,
}

impl PricePoint {
    pub fn new(date: NaiveDate, crop: impl Into<String>, price: Decimal) -> Self {
        Self {
            date,
            crop: crop.into().to_lowercase(),
            price,
            unit: "USD/bushel".into(),
        }
    }
}

/// A market news item
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub date: NaiveDate,
    pub crops: Vec<String>,
    pub headline: String,
    pub source: String,
}

/// A weather observation or forecast entry for a region
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub date: NaiveDate,
    pub region: String,
    /// Temperature in Celsius
    pub temperature_c: f64,
    /// Precipitation in millimeters
    pub precipitation_mm: f64,
    /// Days ahead this entry forecasts (0 = observed)
    pub horizon_days: u32,
}

/// Price trend direction over the analysis window
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

/// Result of price trend analysis, recomputed per request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub direction: TrendDirection,
    /// Most recent price in the analyzed series
    pub current_price: Decimal,
    /// Percent change between first and last price
    pub percent_change: Decimal,
    /// Standard deviation of period-over-period percent changes
    pub volatility: f64,
}

/// Coarse sentiment classification
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

/// Aggregate news sentiment over the analysis window
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Mean per-item score, bounded to [-1, 1]
    pub score: f64,
    pub label: SentimentLabel,
    pub item_count: usize,
}

impl SentimentResult {
    /// The result for an empty news set
    pub fn neutral() -> Self {
        Self {
            score: 0.0,
            label: SentimentLabel::Neutral,
            item_count: 0,
        }
    }
}

/// Qualitative weather impact rating
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactRating {
    Low,
    Medium,
    High,
}

/// Weather impact assessment for a crop
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImpactResult {
    pub crop: String,
    pub rating: ImpactRating,
    pub rationale: String,
    /// Mean temperature over the forecast window, Celsius
    pub mean_temperature_c: f64,
    /// Total precipitation over the forecast window, millimeters
    pub total_precipitation_mm: f64,
}

/// The structured payload handed to the LLM client. Constructed once per
/// user interaction and passed by value; no shared mutable state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryRequest {
    pub crop: String,
    pub timeframe: Timeframe,
    pub query: String,
    pub trend: TrendResult,
    pub sentiment: SentimentResult,
    pub impact: ImpactResult,
}

/// The advisory request plus the model's free-text recommendation.
/// This is the JSON document both the CLI and the server emit.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdvisoryResponse {
    #[serde(flatten)]
    pub request: AdvisoryRequest,
    pub advice: String,
    pub model: String,
    pub generated_at: DateTime<Utc>,
}
