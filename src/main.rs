use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

use market_insights::config::Settings;
use market_insights::engine::volatility::VolatilityTracker;
use market_insights::market_data::adapters::fixture::FixtureProvider;
use market_insights::market_data::adapters::injective::InjectiveAdapter;
use market_insights::market_data::adapters::MarketDataProvider;
use market_insights::market_data::analytics::MarketAnalytics;
use market_insights::market_data::service::{MarketFilter, MarketService};
use market_insights::telemetry;

#[derive(Parser)]
#[command(name = "market-insights", about = "Order-book liquidity and volatility analytics")]
struct Cli {
    /// Settings file (TOML); defaults to ./insights.toml when present
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Serve markets and books from a JSON fixture instead of the indexer
    #[arg(long, global = true)]
    fixture: Option<PathBuf>,

    /// Override provider.base_url
    #[arg(long, global = true)]
    provider_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List markets
    Markets {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        ticker: Option<String>,
    },
    /// Show one market
    Market { market_id: String },
    /// Show the normalised order book
    Orderbook { market_id: String },
    /// Top bid/ask and spread
    Summary { market_id: String },
    /// Depth, imbalance and liquidity score
    Liquidity {
        market_id: String,
        #[arg(long)]
        depth: Option<usize>,
    },
    /// Summary + liquidity + rolling volatility; each sample extends the history by one
    Analytics {
        market_id: String,
        #[arg(long, default_value_t = 1)]
        samples: u32,
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,
    },
    /// All markets ordered by liquidity score
    Rank {
        #[arg(long)]
        top: Option<usize>,
    },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn build_provider(cli: &Cli, settings: &Settings) -> anyhow::Result<Arc<dyn MarketDataProvider>> {
    if let Some(path) = &cli.fixture {
        return Ok(Arc::new(FixtureProvider::from_file(path)?));
    }
    let base_url = cli.provider_url.as_deref().unwrap_or(&settings.provider.base_url);
    info!(%base_url, "using indexer provider");
    Ok(Arc::new(InjectiveAdapter::new(base_url, settings.provider.timeout())?))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok(); // load .env

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    telemetry::init_tracing(&settings.telemetry.log_filter);
    if settings.telemetry.metrics {
        telemetry::init_metrics()?;
    }

    let provider = build_provider(&cli, &settings)?;
    let service = MarketService::new(provider)
        .with_depth(settings.analytics.depth)
        .with_rank_concurrency(settings.analytics.rank_concurrency);

    // One tracker for the life of the process
    let tracker = Arc::new(VolatilityTracker::new());
    let analytics = MarketAnalytics::new(service.clone(), Arc::clone(&tracker));

    match cli.command {
        Command::Markets { status, ticker } => {
            let markets = service.list_markets(&MarketFilter { status, ticker }).await?;
            print_json(&markets)?;
        }
        Command::Market { market_id } => {
            print_json(&service.get_market(&market_id).await?)?;
        }
        Command::Orderbook { market_id } => {
            print_json(&service.fetch_orderbook(&market_id).await?)?;
        }
        Command::Summary { market_id } => {
            print_json(&service.fetch_market_summary(&market_id).await?)?;
        }
        Command::Liquidity { market_id, depth } => {
            print_json(&service.fetch_liquidity(&market_id, depth).await?)?;
        }
        Command::Analytics { market_id, samples, interval_ms } => {
            let mut interval = tokio::time::interval(Duration::from_millis(interval_ms.max(1)));
            for n in 1..=samples.max(1) {
                interval.tick().await;
                match analytics.get_analytics(&market_id).await {
                    Ok(report) => {
                        info!(
                            sample = n,
                            history = tracker.snapshots(&market_id).len(),
                            score = report.volatility.volatility_score,
                            level = %report.volatility.level,
                            "analytics sample"
                        );
                        print_json(&report)?;
                    }
                    Err(e) => {
                        warn!(sample = n, kind = e.kind(), error = %e, "analytics request failed");
                        return Err(e.into());
                    }
                }
            }
        }
        Command::Rank { top } => {
            let mut ranked = service.rank_markets().await?;
            if let Some(n) = top {
                ranked.truncate(n);
            }
            print_json(&ranked)?;
        }
    }

    Ok(())
}
