//! Advisor Configuration
//!
//! All tunables live in an explicitly passed `AdvisorConfig` rather than
//! module-level state, so the analyzers stay pure and testable in isolation.
//! The weather rule tables are configuration data, not hard-coded logic.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};
use crate::model::ImpactRating;

/// A crop known to the advisor, with the base price used by the
/// synthetic generator
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CropProfile {
    pub name: String,
    pub base_price: Decimal,
    pub unit: String,
}

impl CropProfile {
    pub fn new(name: impl Into<String>, base_price: Decimal, unit: impl Into<String>) -> Self {
        Self {
            name: name.into().to_lowercase(),
            base_price,
            unit: unit.into(),
        }
    }
}

/// A single weather impact rule. All present bounds must hold against the
/// window's mean temperature (Celsius) and total precipitation (mm) for
/// the rule to match. First matching rule wins.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WeatherRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_above: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_below: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precip_above: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precip_below: Option<f64>,
    pub rating: ImpactRating,
    pub rationale: String,
}

impl WeatherRule {
    /// Check the rule against a window's mean temperature and total
    /// precipitation
    pub fn matches(&self, mean_temp_c: f64, total_precip_mm: f64) -> bool {
        if let Some(t) = self.temp_above {
            if mean_temp_c <= t {
                return false;
            }
        }
        if let Some(t) = self.temp_below {
            if mean_temp_c >= t {
                return false;
            }
        }
        if let Some(p) = self.precip_above {
            if total_precip_mm <= p {
                return false;
            }
        }
        if let Some(p) = self.precip_below {
            if total_precip_mm >= p {
                return false;
            }
        }
        true
    }
}

/// Rules for one crop
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CropRules {
    pub crop: String,
    pub rules: Vec<WeatherRule>,
}

/// Per-crop rule lists plus the generic fallback list applied to
/// unrecognized crops
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WeatherRuleTable {
    pub crops: Vec<CropRules>,
    pub generic: Vec<WeatherRule>,
}

impl WeatherRuleTable {
    /// Rule list for a crop, or the generic list when the crop is unknown
    pub fn rules_for(&self, crop: &str) -> &[WeatherRule] {
        let crop = crop.to_lowercase();
        self.crops
            .iter()
            .find(|c| c.crop == crop)
            .map_or(&self.generic[..], |c| &c.rules[..])
    }
}

/// Live data feed endpoint configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeedConfig {
    pub base_url: String,
    #[serde(default = "default_feed_timeout")]
    pub timeout_secs: u64,
}

fn default_feed_timeout() -> u64 {
    30
}

/// Global advisor configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Crops the advisor knows how to analyze
    pub crops: Vec<CropProfile>,

    /// Region used for weather lookups when none is given
    pub default_region: String,

    /// Band around zero percent change classified as flat
    pub deadband_percent: Decimal,

    /// Aggregate score above which sentiment is labeled positive
    pub sentiment_positive_threshold: f64,

    /// Aggregate score below which sentiment is labeled negative
    pub sentiment_negative_threshold: f64,

    /// Weather impact rule tables
    pub weather_rules: WeatherRuleTable,

    /// Optional live feed; absent means synthetic data only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed: Option<FeedConfig>,
}

impl AdvisorConfig {
    /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| AdvisorError::Config(format!("{}: {e}", path.as_ref().display())))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Look up a known crop profile
    pub fn crop_profile(&self, name: &str) -> Option<&CropProfile> {
        let name = name.to_lowercase();
        self.crops.iter().find(|c| c.name == name)
    }

    /// Names of all configured crops
    pub fn crop_names(&self) -> Vec<String> {
        self.crops.iter().map(|c| c.name.clone()).collect()
    }
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            crops: vec![
                CropProfile::new("wheat", dec!(500), "USD/bushel"),
                CropProfile::new("corn", dec!(400), "USD/bushel"),
                CropProfile::new("soybeans", dec!(600), "USD/bushel"),
                CropProfile::new("rice", dec!(350), "USD/cwt"),
                CropProfile::new("cotton", dec!(85), "USD/cwt"),
            ],
            default_region: "midwest".into(),
            deadband_percent: dec!(1),
            sentiment_positive_threshold: 0.2,
            sentiment_negative_threshold: -0.2,
            weather_rules: default_rule_table(),
            feed: None,
        }
    }
}

/// Built-in rule table. Callers can replace the whole table from a config
/// file; these defaults mirror the agronomic thresholds the advisor
/// shipped with.
fn default_rule_table() -> WeatherRuleTable {
    WeatherRuleTable {
        crops: vec![
            CropRules {
                crop: "wheat".into(),
                rules: vec![
                    WeatherRule {
                        temp_above: Some(25.0),
                        temp_below: None,
                        precip_above: None,
                        precip_below: Some(10.0),
                        rating: ImpactRating::High,
                        rationale: "High temperatures and low precipitation may stress wheat crops"
                            .into(),
                    },
                    WeatherRule {
                        temp_above: None,
                        temp_below: Some(15.0),
                        precip_above: Some(30.0),
                        precip_below: None,
                        rating: ImpactRating::High,
                        rationale: "Low temperatures and excessive rainfall may damage wheat crops"
                            .into(),
                    },
                ],
            },
            CropRules {
                crop: "corn".into(),
                rules: vec![
                    WeatherRule {
                        temp_above: Some(30.0),
                        temp_below: None,
                        precip_above: None,
                        precip_below: Some(20.0),
                        rating: ImpactRating::High,
                        rationale: "High heat and insufficient moisture may stress corn crops"
                            .into(),
                    },
                    WeatherRule {
                        temp_above: None,
                        temp_below: Some(18.0),
                        precip_above: None,
                        precip_below: None,
                        rating: ImpactRating::Medium,
                        rationale: "Low temperatures may reduce corn yields".into(),
                    },
                    WeatherRule {
                        temp_above: None,
                        temp_below: None,
                        precip_above: None,
                        precip_below: Some(15.0),
                        rating: ImpactRating::Medium,
                        rationale: "Insufficient rainfall may reduce corn yields".into(),
                    },
                ],
            },
            CropRules {
                crop: "soybeans".into(),
                rules: vec![
                    WeatherRule {
                        temp_above: None,
                        temp_below: None,
                        precip_above: Some(40.0),
                        precip_below: None,
                        rating: ImpactRating::High,
                        rationale: "Excessive rainfall may lead to disease pressure in soybeans"
                            .into(),
                    },
                    WeatherRule {
                        temp_above: None,
                        temp_below: Some(20.0),
                        precip_above: None,
                        precip_below: None,
                        rating: ImpactRating::Medium,
                        rationale: "Low temperatures may reduce soybean yields".into(),
                    },
                    WeatherRule {
                        temp_above: None,
                        temp_below: None,
                        precip_above: None,
                        precip_below: Some(10.0),
                        rating: ImpactRating::Medium,
                        rationale: "Dry conditions may reduce soybean yields".into(),
                    },
                ],
            },
        ],
        generic: vec![
            WeatherRule {
                temp_above: Some(32.0),
                temp_below: None,
                precip_above: None,
                precip_below: None,
                rating: ImpactRating::High,
                rationale: "Extreme heat is likely to stress most crops".into(),
            },
            WeatherRule {
                temp_above: None,
                temp_below: None,
                precip_above: None,
                precip_below: Some(5.0),
                rating: ImpactRating::Medium,
                rationale: "Drought conditions may reduce yields".into(),
            },
            WeatherRule {
                temp_above: None,
                temp_below: None,
                precip_above: Some(50.0),
                precip_below: None,
                rating: ImpactRating::Medium,
                rationale: "Excess precipitation may delay field work and raise disease risk"
                    .into(),
            },
        ],
    }
}
