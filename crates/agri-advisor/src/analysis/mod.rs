//! Analyzers
//!
//! The three pure analyses run per advisory request: price trend, news
//! sentiment, and weather impact. Each is a deterministic function of its
//! inputs with no hidden state.

mod sentiment;
mod trend;
mod weather;

pub use sentiment::SentimentAnalyzer;
pub use trend::TrendAnalyzer;
pub use weather::WeatherImpactEstimator;
