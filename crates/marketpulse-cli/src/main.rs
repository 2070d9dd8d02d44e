mod render;

use std::io::Write as _;

use clap::Parser;
use marketpulse_core::{
    AnalysisRequest, TieBreakPolicy, DEFAULT_INDUSTRY, DEFAULT_LOCATION, DEFAULT_SCENARIO,
    DEFAULT_TICKER,
};
use marketpulse_sentiment::{run_analysis, Adapters, ProgressEvent};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "marketpulse")]
#[command(about = "Market sentiment from news headlines, an RSS feed and recent prices")]
struct Cli {
    /// Industry or company to search for; also the RSS keyword
    #[arg(long, default_value = DEFAULT_INDUSTRY)]
    industry: String,

    /// Market region appended to the news query
    #[arg(long, default_value = DEFAULT_LOCATION)]
    location: String,

    /// Free-text question appended to the news query
    #[arg(long, default_value = DEFAULT_SCENARIO)]
    scenario: String,

    /// Ticker symbol for the price section
    #[arg(long, default_value = DEFAULT_TICKER)]
    ticker: String,

    /// Skip the price section
    #[arg(long)]
    no_ticker: bool,

    /// Tie-break policy for the overall verdict (three-way or positive-negative).
    /// Overrides MARKETPULSE_TIE_BREAK_POLICY.
    #[arg(long)]
    policy: Option<TieBreakPolicy>,
}

impl Cli {
    fn request(&self) -> AnalysisRequest {
        AnalysisRequest {
            industry: self.industry.clone(),
            location: self.location.clone(),
            scenario: self.scenario.clone(),
            ticker: (!self.no_ticker).then(|| self.ticker.clone()),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Reads `.env` before the process environment.
    let config = marketpulse_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let policy = cli.policy.unwrap_or(config.tie_break_policy);
    let request = cli.request();
    let adapters = Adapters::from_config(&config)?;

    let outcome = run_analysis(&adapters, &request, policy, print_progress).await;

    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}", render::render_outcome(&outcome, &request))?;
    writeln!(stdout, "{}", render::render_footer(&config, request.ticker_symbol().is_some()))?;
    Ok(())
}

fn print_progress(event: ProgressEvent<'_>) {
    let note = if event.fell_back { " (classification failed)" } else { "" };
    eprintln!(
        "[{}/{}] {} {}{note}",
        event.completed,
        event.total,
        render::glyph(event.label),
        event.headline
    );
}
