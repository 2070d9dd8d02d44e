//! Human-readable market sentiment report.

use std::fmt::Write as _;

use marketpulse_core::TieBreakPolicy;

use crate::aggregate::{
    compute_distribution, derive_overall_label, OverallLabel, SentimentDistribution,
};
use crate::types::{SentimentLabel, SentimentResults};

/// Shown in place of a report when nothing was classified.
pub const NO_DATA_MESSAGE: &str = "No sentiment data available.";

/// Aggregated outcome of one run's classification pass.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketReport {
    pub distribution: SentimentDistribution,
    pub overall: OverallLabel,
    pub policy: TieBreakPolicy,
    pub summary: String,
}

/// Distribution, verdict and summary for `results`, or `None` when empty.
#[must_use]
pub fn generate_market_report(
    results: &SentimentResults,
    policy: TieBreakPolicy,
) -> Option<MarketReport> {
    let distribution = compute_distribution(results)?;
    let overall = derive_overall_label(&distribution, policy);
    let summary = format_report(&distribution, overall);
    Some(MarketReport {
        distribution,
        overall,
        policy,
        summary,
    })
}

/// Render the multi-line summary for a distribution and its verdict.
///
/// All three labels are listed, including those at 0.00%.
#[must_use]
pub fn format_report(distribution: &SentimentDistribution, overall: OverallLabel) -> String {
    let mut out = String::from("Market Sentiment Report:\n\n");
    for label in SentimentLabel::ALL {
        let _ = writeln!(out, "{label}: {:.2}%", distribution.percentage(label));
    }
    out.push('\n');
    out.push_str(&conclusion(distribution, overall));
    out
}

fn conclusion(d: &SentimentDistribution, overall: OverallLabel) -> String {
    let verdict = overall.as_str().to_uppercase();
    match overall {
        OverallLabel::Positive => format!(
            "Overall Sentiment: {verdict} - Market sentiment is positive ({:.1}%). Growth opportunities ahead.",
            d.positive
        ),
        OverallLabel::Negative => format!(
            "Overall Sentiment: {verdict} - Market sentiment is negative ({:.1}%). High risk detected. Caution advised.",
            d.negative
        ),
        OverallLabel::Neutral => format!(
            "Overall Sentiment: {verdict} - Market sentiment is neutral ({:.1}%). Mixed signals observed.",
            d.neutral
        ),
        OverallLabel::Mixed => format!(
            "Overall Sentiment: {verdict} - Positive and negative sentiment are balanced ({:.1}% / {:.1}%). Mixed signals observed.",
            d.positive, d.negative
        ),
    }
}
