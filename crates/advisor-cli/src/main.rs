//! Command-line interface for agri-advisor
//!
//! Runs one advisory request end-to-end and prints the recommendation
//! along with a summary of the analyzed data.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use advisor_core::{GenerationOptions, LlmProvider};
use advisor_runtime::GroqProvider;
use agri_advisor::{Advisor, AdvisorConfig, Timeframe};

#[derive(Parser, Debug)]
#[command(name = "advisor-cli")]
#[command(about = "Agricultural market advisor CLI", long_about = None)]
struct Args {
    /// Crop to analyze
    #[arg(long, default_value = "wheat")]
    crop: String,

    /// Analysis timeframe (1 week, 1 month, 3 months)
    #[arg(long, default_value = "1 month")]
    timeframe: String,

    /// Farmer question to answer
    #[arg(long)]
    query: String,

    /// Force a data re-fetch before analysis
    #[arg(long)]
    refresh: bool,

    /// Write the full advisory as JSON to this file
    #[arg(long)]
    output: Option<String>,

    /// Path to a crop/threshold config file
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AdvisorConfig::load(path)?,
        None => AdvisorConfig::default(),
    };

    let timeframe: Timeframe = args.timeframe.parse()?;

    println!("🌾 Agri Market Advisor");
    println!("Analyzing {} for {} timeframe", args.crop, timeframe);

    let provider: Arc<dyn LlmProvider> = Arc::new(GroqProvider::from_env()?);
    let advisor = Advisor::new(&config, provider, GenerationOptions::default())?;

    if args.refresh {
        println!("Refreshing data...");
    }

    println!("Analyzing market data...");
    println!("Generating personalized advice...");
    let advisory = advisor
        .advise(&args.crop, timeframe, &args.query, args.refresh)
        .await?;

    println!("\n===== MARKET ADVICE =====");
    println!("{}", advisory.advice);

    println!("\n===== DATA SUMMARY =====");
    let trend = &advisory.request.trend;
    println!("- Current Price: {:.2}", trend.current_price);
    println!(
        "- Price Trend: {:?} ({:.2}% over {})",
        trend.direction, trend.percent_change, timeframe
    );
    println!("- Price Volatility: {:.2}%", trend.volatility);
    let sentiment = &advisory.request.sentiment;
    println!(
        "- News Sentiment: {:?} (score {:.2}, {} items)",
        sentiment.label, sentiment.score, sentiment.item_count
    );
    let impact = &advisory.request.impact;
    println!("- Weather Impact: {:?} - {}", impact.rating, impact.rationale);
    println!("- Model: {}", advisory.model);

    println!("\nGenerated on: {}", advisory.generated_at.to_rfc3339());

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&advisory)?;
        std::fs::write(path, json)?;
        println!("\nResults saved to {path}");
    }

    Ok(())
}
