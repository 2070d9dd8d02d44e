//! Analysis run orchestration.

use marketpulse_core::{AnalysisRequest, AppConfig, TieBreakPolicy};

use crate::classifier::{HeadlineClassifier, OpenAiClassifier};
use crate::error::SentimentError;
use crate::report::{generate_market_report, MarketReport};
use crate::sources::{MarketDataClient, RssFeedClient, SerpApiClient};
use crate::types::{
    FeedItem, NewsQuery, PriceBar, SentimentLabel, SentimentResults, SourceOutcome,
};

/// Placeholder some news sources emit in place of a real headline.
pub const PLACEHOLDER_HEADLINE: &str = "No relevant news found.";

/// Emitted after each headline is classified.
#[derive(Debug, Clone, Copy)]
pub struct ProgressEvent<'a> {
    /// Headlines processed so far, including this one.
    pub completed: usize,
    pub total: usize,
    pub headline: &'a str,
    pub label: SentimentLabel,
    /// `true` when the label is the Neutral fallback after a failed call.
    pub fell_back: bool,
}

/// A headline whose classification failed and was recorded as Neutral.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationWarning {
    pub headline: String,
    pub error: String,
}

/// Output of [`classify_headlines`].
#[derive(Debug, Clone, Default)]
pub struct Classified {
    pub results: SentimentResults,
    pub warnings: Vec<ClassificationWarning>,
}

/// Classify headlines one at a time, in order.
///
/// Blank headlines and [`PLACEHOLDER_HEADLINE`] are skipped. A failed call
/// labels that headline Neutral, records a [`ClassificationWarning`], and
/// moves on to the next one.
/// `on_progress` fires after each classified headline with its 1-based
/// position in `headlines`.
pub async fn classify_headlines<C, P>(
    classifier: &C,
    headlines: &[String],
    mut on_progress: P,
) -> Classified
where
    C: HeadlineClassifier,
    P: FnMut(ProgressEvent<'_>),
{
    let total = headlines.len();
    let mut classified = Classified::default();

    for (i, headline) in headlines.iter().enumerate() {
        let headline = headline.trim();
        if headline.is_empty() || headline == PLACEHOLDER_HEADLINE {
            tracing::debug!(index = i, headline, "skipping blank or placeholder headline");
            continue;
        }

        let (label, fell_back) = match classifier.classify(headline).await {
            Ok(label) => (label, false),
            Err(e) => {
                tracing::warn!(headline, error = %e, "classification failed; defaulting to Neutral");
                classified.warnings.push(ClassificationWarning {
                    headline: headline.to_string(),
                    error: e.to_string(),
                });
                (SentimentLabel::Neutral, true)
            }
        };
        classified.results.insert(headline, label);

        on_progress(ProgressEvent {
            completed: i + 1,
            total,
            headline,
            label,
            fell_back,
        });
    }

    classified
}

/// The four provider adapters used by one run.
pub struct Adapters {
    pub news: SerpApiClient,
    pub feed: RssFeedClient,
    pub market: MarketDataClient,
    pub classifier: OpenAiClassifier,
}

impl Adapters {
    /// # Errors
    ///
    /// Returns [`SentimentError`] if any client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, SentimentError> {
        Ok(Self {
            news: SerpApiClient::new(config)?,
            feed: RssFeedClient::new(config)?,
            market: MarketDataClient::new(config)?,
            classifier: OpenAiClassifier::new(config)?,
        })
    }
}

/// Classification and report for the headline section.
#[derive(Debug, Clone)]
pub struct SentimentAnalysis {
    pub results: SentimentResults,
    pub warnings: Vec<ClassificationWarning>,
    /// `None` when every headline was blank.
    pub report: Option<MarketReport>,
}

/// Everything one run produced, section by section.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    /// The query text sent to the news search.
    pub query: String,
    pub news: SourceOutcome<String>,
    /// `None` when the news search produced no headlines; the classifier is
    /// not called in that case.
    pub sentiment: Option<SentimentAnalysis>,
    /// Feed items matching the industry keyword.
    pub feed: SourceOutcome<FeedItem>,
    /// `None` when no ticker was requested.
    pub prices: Option<SourceOutcome<PriceBar>>,
}

/// Run one full analysis.
///
/// Sections are independent: a failed or empty news search stops only the
/// sentiment section, and feed or market-data failures only affect their own
/// section. Nothing here returns an error; failures are carried in the outcome.
pub async fn run_analysis<P>(
    adapters: &Adapters,
    request: &AnalysisRequest,
    policy: TieBreakPolicy,
    on_progress: P,
) -> AnalysisOutcome
where
    P: FnMut(ProgressEvent<'_>),
{
    let query = NewsQuery::from(request);
    let query_string = query.query_string();
    tracing::info!(query = %query_string, policy = %policy, "starting analysis");

    let news = SourceOutcome::from_result("serpapi", adapters.news.search_headlines(&query).await);

    let sentiment = match &news {
        SourceOutcome::Found(headlines) => {
            let classified = classify_headlines(&adapters.classifier, headlines, on_progress).await;
            let report = generate_market_report(&classified.results, policy);
            Some(SentimentAnalysis {
                results: classified.results,
                warnings: classified.warnings,
                report,
            })
        }
        SourceOutcome::Empty | SourceOutcome::Failed(_) => {
            tracing::warn!(query = %query_string, "no headlines found; skipping classification");
            None
        }
    };

    let feed = SourceOutcome::from_result("rss", adapters.feed.fetch_matching(&request.industry).await);

    let prices = match request.ticker_symbol() {
        Some(ticker) => Some(SourceOutcome::from_result(
            "market_data",
            adapters.market.fetch_recent_prices(ticker).await,
        )),
        None => None,
    };

    AnalysisOutcome {
        query: query_string,
        news,
        sentiment,
        feed,
        prices,
    }
}
