//! Weather Impact Estimation
//!
//! Maps forecast conditions to a qualitative rating per crop using the
//! configured rule tables. Total over its inputs: unknown crops fall back
//! to the generic rules and empty forecasts rate low.

use crate::config::WeatherRuleTable;
use crate::model::{ImpactRating, ImpactResult, WeatherObservation};

/// Rationale used when no rule matches
pub const NO_RISK_RATIONALE: &str = "no significant risk detected";

/// Weather impact estimator driven by the configured rule table
pub struct WeatherImpactEstimator {
    rules: WeatherRuleTable,
}

impl WeatherImpactEstimator {
    pub fn new(rules: WeatherRuleTable) -> Self {
        Self { rules }
    }

    /// Estimate the impact of the forecast window on a crop. Never fails;
    /// unrecognized crops are evaluated against the generic rule set.
    pub fn estimate(&self, crop: &str, observations: &[WeatherObservation]) -> ImpactResult {
        let crop = crop.to_lowercase();

        if observations.is_empty() {
            return ImpactResult {
                crop,
                rating: ImpactRating::Low,
                rationale: "no forecast data available".into(),
                mean_temperature_c: 0.0,
                total_precipitation_mm: 0.0,
            };
        }

        let mean_temp = observations
            .iter()
            .map(|o| o.temperature_c)
            .sum::<f64>()
            / observations.len() as f64;
        let total_precip: f64 = observations.iter().map(|o| o.precipitation_mm).sum();

        let matched = self
            .rules
            .rules_for(&crop)
            .iter()
            .find(|rule| rule.matches(mean_temp, total_precip));

        let (rating, rationale) = match matched {
            Some(rule) => (rule.rating, rule.rationale.clone()),
            None => (ImpactRating::Low, NO_RISK_RATIONALE.into()),
        };

        ImpactResult {
            crop,
            rating,
            rationale,
            mean_temperature_c: mean_temp,
            total_precipitation_mm: total_precip,
        }
    }
}
