//! Market sentiment analysis for marketpulse.
//!
//! Pulls headlines from a news search API, classifies each one with a
//! chat-completion model, and aggregates the labels into a percentage
//! distribution and an overall verdict. An RSS feed and a market-data API
//! are queried alongside as independent report sections.

pub mod aggregate;
pub mod classifier;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod sources;
pub mod types;

mod http;

pub use aggregate::{
    compute_distribution, derive_overall_label, OverallLabel, SentimentDistribution,
};
pub use classifier::{HeadlineClassifier, OpenAiClassifier};
pub use error::SentimentError;
pub use pipeline::{
    classify_headlines, run_analysis, Adapters, AnalysisOutcome, ClassificationWarning,
    Classified, ProgressEvent, SentimentAnalysis, PLACEHOLDER_HEADLINE,
};
pub use report::{format_report, generate_market_report, MarketReport, NO_DATA_MESSAGE};
pub use sources::{MarketDataClient, RssFeedClient, SerpApiClient};
pub use types::{FeedItem, NewsQuery, PriceBar, SentimentLabel, SentimentResults, SourceOutcome};
