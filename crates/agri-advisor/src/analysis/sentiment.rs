//! News Sentiment Analysis
//!
//! Keyword-weighted scoring of agricultural market headlines. Each item
//! scores into [-1, 1]; the aggregate is the mean across items with a
//! coarse label from fixed thresholds.

use crate::model::{NewsItem, SentimentLabel, SentimentResult};

/// Agricultural market vocabulary and weights. Positive terms signal
/// rising demand or prices for the producer; negative terms signal
/// oversupply or yield risk.
const POSITIVE_KEYWORDS: &[(&str, f64)] = &[
    ("demand increases", 0.5),
    ("increases", 0.3),
    ("boost", 0.4),
    ("exports", 0.2),
    ("strong", 0.4),
    ("rally", 0.4),
    ("record high", 0.5),
    ("shortage", 0.3), // scarcity lifts producer prices
    ("trade deal", 0.3),
    ("surge", 0.4),
    ("rebound", 0.3),
];

const NEGATIVE_KEYWORDS: &[(&str, f64)] = &[
    ("threaten", -0.4),
    ("stockpiles", -0.4),
    ("oversupply", -0.5),
    ("surplus", -0.4),
    ("drought", -0.3),
    ("pest", -0.4),
    ("disease", -0.4),
    ("tariff", -0.3),
    ("slump", -0.5),
    ("falls", -0.3),
    ("decline", -0.3),
    ("damage", -0.4),
];

/// News sentiment analyzer
pub struct SentimentAnalyzer {
    positive_threshold: f64,
    negative_threshold: f64,
}

impl SentimentAnalyzer {
    pub fn new(positive_threshold: f64, negative_threshold: f64) -> Self {
        Self {
            positive_threshold,
            negative_threshold,
        }
    }

    /// Score a set of news items.
    ///
    /// An empty set is not an error: it yields a neutral result with a
    /// zero score and zero count.
    pub fn analyze(&self, items: &[NewsItem]) -> SentimentResult {
        if items.is_empty() {
            return SentimentResult::neutral();
        }

        let total: f64 = items.iter().map(|item| score_item(&item.headline)).sum();
        let score = total / items.len() as f64;

        let label = if score > self.positive_threshold {
            SentimentLabel::Positive
        } else if score < self.negative_threshold {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };

        SentimentResult {
            score,
            label,
            item_count: items.len(),
        }
    }
}

/// Score one headline into [-1, 1]
fn score_item(text: &str) -> f64 {
    let text = text.to_lowercase();
    let mut score = 0.0;

    for (keyword, weight) in POSITIVE_KEYWORDS {
        if text.contains(keyword) {
            score += weight;
        }
    }
    for (keyword, weight) in NEGATIVE_KEYWORDS {
        if text.contains(keyword) {
            score += weight;
        }
    }

    score.clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn item(headline: &str) -> NewsItem {
        NewsItem {
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            crops: vec!["wheat".into()],
            headline: headline.into(),
            source: "test".into(),
        }
    }

    fn analyzer() -> SentimentAnalyzer {
        SentimentAnalyzer::new(0.2, -0.2)
    }

    #[test]
    fn test_empty_news_is_neutral_zero() {
        let result = analyzer().analyze(&[]);
        assert_eq!(result.label, SentimentLabel::Neutral);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.item_count, 0);
    }

    #[test]
    fn test_positive_headlines() {
        let items = vec![
            item("Global demand increases amid supply concerns"),
            item("New trade deal may boost wheat exports"),
        ];
        let result = analyzer().analyze(&items);
        assert_eq!(result.label, SentimentLabel::Positive);
        assert!(result.score > 0.2);
        assert_eq!(result.item_count, 2);
    }

    #[test]
    fn test_negative_headlines() {
        let items = vec![
            item("Weather conditions threaten wheat yield in major regions"),
            item("Report shows increased wheat stockpiles"),
        ];
        let result = analyzer().analyze(&items);
        assert_eq!(result.label, SentimentLabel::Negative);
        assert!(result.score < -0.2);
    }

    #[test]
    fn test_mixed_headlines_stay_neutral() {
        let items = vec![
            item("Analysts predict strong wheat market for next quarter"),
            item("Report shows increased wheat stockpiles"),
        ];
        let result = analyzer().analyze(&items);
        assert_eq!(result.label, SentimentLabel::Neutral);
    }

    #[test]
    fn test_item_score_is_bounded() {
        let loaded = "oversupply slump surplus drought pest disease tariff damage falls decline";
        assert_eq!(score_item(loaded), -1.0);
    }

    #[test]
    fn test_unscored_headline_is_zero() {
        assert_eq!(score_item("Wheat planting season begins in the plains"), 0.0);
    }
}
