//! Advisory Composer
//!
//! Merges the three analyses plus the farmer's question into a structured
//! request, renders it into a prompt, and obtains the natural-language
//! recommendation from the LLM provider. Composition itself is pure; only
//! the provider call has effects.

use std::fmt::Write as _;
use std::sync::Arc;

use advisor_core::{GenerationOptions, LlmProvider, Message};
use chrono::Utc;

use crate::analysis::{SentimentAnalyzer, TrendAnalyzer, WeatherImpactEstimator};
use crate::config::AdvisorConfig;
use crate::error::{AdvisorError, Result};
use crate::market::DataProvider;
use crate::model::{
    AdvisoryRequest, AdvisoryResponse, ImpactResult, SentimentResult, Timeframe, TrendDirection,
    TrendResult,
};

/// System role for the advisory completion
pub const ADVISOR_SYSTEM_PROMPT: &str = "You are an agricultural market analyst and advisor. \
You provide farmers with informed, practical advice on crop marketing decisions \
based on data analysis, market trends, and weather forecasts. Your advice should \
be clear, concise, and actionable with specific recommendations.";

/// Build an advisory request from the analyzer outputs plus the
/// caller-supplied crop, timeframe, and query.
///
/// Pure aggregation: the output fields are exactly the union of the
/// inputs, with no loss and no duplication.
pub fn compose(
    crop: impl Into<String>,
    timeframe: Timeframe,
    query: impl Into<String>,
    trend: TrendResult,
    sentiment: SentimentResult,
    impact: ImpactResult,
) -> AdvisoryRequest {
    AdvisoryRequest {
        crop: crop.into().to_lowercase(),
        timeframe,
        query: query.into(),
        trend,
        sentiment,
        impact,
    }
}

/// Render the market-analysis context prompt for a request
pub fn render_prompt(request: &AdvisoryRequest) -> String {
    let direction = match request.trend.direction {
        TrendDirection::Up => "increasing",
        TrendDirection::Down => "decreasing",
        TrendDirection::Flat => "stable",
    };

    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "Here is the current market analysis for {}:\n",
        request.crop.to_uppercase()
    );

    let _ = writeln!(prompt, "PRICE ANALYSIS ({}):", request.timeframe);
    let _ = writeln!(prompt, "- Current price: {:.2}", request.trend.current_price);
    let _ = writeln!(prompt, "- Price trend: {direction}");
    let _ = writeln!(
        prompt,
        "- Price change: {:.2}% over the last {}",
        request.trend.percent_change, request.timeframe
    );
    let _ = writeln!(
        prompt,
        "- Price volatility: {:.2}% period over period\n",
        request.trend.volatility
    );

    let _ = writeln!(prompt, "MARKET SENTIMENT:");
    let _ = writeln!(
        prompt,
        "- Overall sentiment: {:?} (score {:.2}, from {} news items)\n",
        request.sentiment.label, request.sentiment.score, request.sentiment.item_count
    );

    let _ = writeln!(prompt, "WEATHER FORECAST IMPACT:");
    let _ = writeln!(prompt, "- Impact rating: {:?}", request.impact.rating);
    let _ = writeln!(
        prompt,
        "- Average temperature: {:.1}C",
        request.impact.mean_temperature_c
    );
    let _ = writeln!(
        prompt,
        "- Total precipitation: {:.1}mm",
        request.impact.total_precipitation_mm
    );
    let _ = writeln!(prompt, "- Explanation: {}\n", request.impact.rationale);

    let _ = writeln!(
        prompt,
        "Based on this analysis, provide specific advice in response to the farmer's question:\n\"{}\"\n",
        request.query
    );
    prompt.push_str(
        "Your advice should include:\n\
         1. A clear recommendation (sell now, hold, or partial sale)\n\
         2. Reasoning behind your recommendation\n\
         3. Timing suggestions (when to sell if not now)\n\
         4. Risks to be aware of\n\
         5. Alternative strategies to consider\n",
    );

    prompt
}

/// The advisory pipeline: data provider in, recommendation out
pub struct Advisor {
    data: DataProvider,
    llm: Arc<dyn LlmProvider>,
    options: GenerationOptions,
    trend: TrendAnalyzer,
    sentiment: SentimentAnalyzer,
    weather: WeatherImpactEstimator,
}

impl Advisor {
    pub fn new(
        config: &AdvisorConfig,
        llm: Arc<dyn LlmProvider>,
        options: GenerationOptions,
    ) -> Result<Self> {
        Ok(Self {
            data: DataProvider::new(config)?,
            llm,
            options,
            trend: TrendAnalyzer::new(config.deadband_percent),
            sentiment: SentimentAnalyzer::new(
                config.sentiment_positive_threshold,
                config.sentiment_negative_threshold,
            ),
            weather: WeatherImpactEstimator::new(config.weather_rules.clone()),
        })
    }

    /// Whether the underlying provider has a live feed configured
    pub fn has_live_feed(&self) -> bool {
        self.data.has_live_feed()
    }

    /// Run one full advisory request: fetch data, run the three
    /// analyzers, compose the request, and ask the model.
    pub async fn advise(
        &self,
        crop: &str,
        timeframe: Timeframe,
        query: &str,
        refresh: bool,
    ) -> Result<AdvisoryResponse> {
        tracing::info!(crop, %timeframe, refresh, "running advisory request");

        let snapshot = self.data.fetch(crop, timeframe, refresh).await?;

        let trend = self.trend.analyze(&snapshot.prices)?;
        let sentiment = self.sentiment.analyze(&snapshot.news);
        let impact = self.weather.estimate(crop, &snapshot.weather);

        let request = compose(crop, timeframe, query, trend, sentiment, impact);
        self.request_opinion(request).await
    }

    /// Hand a composed request to the LLM client and wrap its answer.
    /// Any provider failure or unusable completion surfaces as a single
    /// `OpinionUnavailable` condition.
    pub async fn request_opinion(&self, request: AdvisoryRequest) -> Result<AdvisoryResponse> {
        let messages = vec![
            Message::system(ADVISOR_SYSTEM_PROMPT),
            Message::user(render_prompt(&request)),
        ];

        let completion = self
            .llm
            .complete(&messages, &self.options)
            .await
            .map_err(|e| AdvisorError::OpinionUnavailable(e.user_message()))?;

        if completion.content.trim().is_empty() {
            return Err(AdvisorError::OpinionUnavailable(
                "model returned an empty response".into(),
            ));
        }

        Ok(AdvisoryResponse {
            request,
            advice: completion.content,
            model: completion.model,
            generated_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::error::CoreError;
    use advisor_core::provider::{Completion, ModelInfo, ProviderInfo};
    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    use crate::model::{ImpactRating, SentimentLabel};

    /// Stub provider returning a fixed completion, or failing
    struct StubProvider {
        response: Option<String>,
    }

    #[async_trait]
    impl LlmProvider for StubProvider {
        async fn info(&self) -> advisor_core::Result<ProviderInfo> {
            Ok(ProviderInfo {
                name: "Stub".into(),
                version: None,
                models: vec![],
            })
        }

        async fn health_check(&self) -> advisor_core::Result<bool> {
            Ok(true)
        }

        async fn complete(
            &self,
            _messages: &[Message],
            options: &GenerationOptions,
        ) -> advisor_core::Result<Completion> {
            match &self.response {
                Some(content) => Ok(Completion {
                    content: content.clone(),
                    model: options.model.clone(),
                    usage: None,
                    truncated: false,
                    finish_reason: None,
                }),
                None => Err(CoreError::ProviderUnavailable("stub is down".into())),
            }
        }

        async fn list_models(&self) -> advisor_core::Result<Vec<ModelInfo>> {
            Ok(vec![])
        }
    }

    fn sample_request() -> AdvisoryRequest {
        compose(
            "Wheat",
            Timeframe::OneMonth,
            "Should I sell now?",
            TrendResult {
                direction: TrendDirection::Up,
                current_price: dec!(105),
                percent_change: dec!(5),
                volatility: 1.7,
            },
            SentimentResult::neutral(),
            ImpactResult {
                crop: "wheat".into(),
                rating: ImpactRating::Low,
                rationale: "no significant risk detected".into(),
                mean_temperature_c: 22.0,
                total_precipitation_mm: 21.0,
            },
        )
    }

    fn advisor(response: Option<&str>) -> Advisor {
        Advisor::new(
            &AdvisorConfig::default(),
            Arc::new(StubProvider {
                response: response.map(String::from),
            }),
            GenerationOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_compose_carries_all_fields_verbatim() {
        let request = sample_request();

        assert_eq!(request.crop, "wheat");
        assert_eq!(request.timeframe, Timeframe::OneMonth);
        assert_eq!(request.query, "Should I sell now?");
        assert_eq!(request.trend.direction, TrendDirection::Up);
        assert_eq!(request.trend.percent_change, dec!(5));
        assert_eq!(request.sentiment.label, SentimentLabel::Neutral);
        assert_eq!(request.sentiment.item_count, 0);
        assert_eq!(request.impact.rating, ImpactRating::Low);
        assert_eq!(request.impact.rationale, "no significant risk detected");
    }

    #[test]
    fn test_prompt_contains_all_sections() {
        let prompt = render_prompt(&sample_request());

        assert!(prompt.contains("WHEAT"));
        assert!(prompt.contains("PRICE ANALYSIS (1 month)"));
        assert!(prompt.contains("Current price: 105.00"));
        assert!(prompt.contains("5.00%"));
        assert!(prompt.contains("MARKET SENTIMENT"));
        assert!(prompt.contains("WEATHER FORECAST IMPACT"));
        assert!(prompt.contains("Average temperature: 22.0C"));
        assert!(prompt.contains("Total precipitation: 21.0mm"));
        assert!(prompt.contains("no significant risk detected"));
        assert!(prompt.contains("Should I sell now?"));
    }

    #[tokio::test]
    async fn test_end_to_end_advisory_with_stub_provider() {
        let advisor = advisor(Some("Hold until prices peak."));
        let response = advisor
            .advise("wheat", Timeframe::OneMonth, "Should I sell now?", false)
            .await
            .unwrap();

        assert_eq!(response.advice, "Hold until prices peak.");
        assert_eq!(response.request.crop, "wheat");
        assert_eq!(response.request.query, "Should I sell now?");
        assert!(response.request.sentiment.score.abs() <= 1.0);
    }

    #[test]
    fn test_pipeline_on_fixed_inputs() {
        use chrono::NaiveDate;
        use crate::model::{PricePoint, WeatherObservation};

        let config = AdvisorConfig::default();
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        let prices: Vec<PricePoint> = [dec!(100), dec!(102), dec!(101), dec!(105)]
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                PricePoint::new(start + chrono::Duration::days(i as i64), "wheat", p)
            })
            .collect();

        let weather: Vec<WeatherObservation> = (0..14)
            .map(|i| WeatherObservation {
                date: start + chrono::Duration::days(i64::from(i)),
                region: "midwest".into(),
                temperature_c: 22.0,
                precipitation_mm: 1.5,
                horizon_days: i,
            })
            .collect();

        let trend = crate::analysis::TrendAnalyzer::new(config.deadband_percent)
            .analyze(&prices)
            .unwrap();
        let sentiment = crate::analysis::SentimentAnalyzer::new(
            config.sentiment_positive_threshold,
            config.sentiment_negative_threshold,
        )
        .analyze(&[]);
        let impact = crate::analysis::WeatherImpactEstimator::new(config.weather_rules)
            .estimate("wheat", &weather);

        let request = compose(
            "wheat",
            Timeframe::OneMonth,
            "Should I sell my wheat now or wait?",
            trend,
            sentiment,
            impact,
        );

        assert_eq!(request.trend.direction, TrendDirection::Up);
        assert_eq!(request.trend.current_price, dec!(105));
        assert_eq!(request.trend.percent_change, dec!(5));
        assert_eq!(request.sentiment.label, SentimentLabel::Neutral);
        assert_eq!(request.sentiment.score, 0.0);
        assert_eq!(request.impact.rating, ImpactRating::Low);
        assert_eq!(request.impact.rationale, "no significant risk detected");
        assert_eq!(request.query, "Should I sell my wheat now or wait?");
    }

    #[tokio::test]
    async fn test_provider_failure_is_opinion_unavailable() {
        let advisor = advisor(None);
        let result = advisor.request_opinion(sample_request()).await;
        match result {
            Err(AdvisorError::OpinionUnavailable(msg)) => {
                // surfaces the user-facing wording, not the raw error
                assert!(msg.contains("currently unavailable"));
            }
            other => panic!("expected OpinionUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_completion_is_opinion_unavailable() {
        let advisor = advisor(Some("   "));
        let result = advisor.request_opinion(sample_request()).await;
        assert!(matches!(result, Err(AdvisorError::OpinionUnavailable(_))));
    }

    #[tokio::test]
    async fn test_unknown_crop_propagates_data_unavailable() {
        let advisor = advisor(Some("irrelevant"));
        let result = advisor
            .advise("durian", Timeframe::OneMonth, "Sell?", false)
            .await;
        assert!(matches!(result, Err(AdvisorError::DataUnavailable(_))));
    }
}
