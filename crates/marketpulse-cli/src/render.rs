//! Plain-text rendering of an analysis run for the terminal.
//!
//! Every function here is pure and returns a `String`; `main` decides where
//! it goes.

use std::fmt::Write as _;

use marketpulse_core::{AnalysisRequest, AppConfig};
use marketpulse_sentiment::{
    AnalysisOutcome, FeedItem, PriceBar, SentimentAnalysis, SentimentLabel, SourceOutcome,
    NO_DATA_MESSAGE,
};

const BAR_WIDTH: usize = 40;

pub(crate) fn glyph(label: SentimentLabel) -> &'static str {
    match label {
        SentimentLabel::Positive => "✅",
        SentimentLabel::Negative => "⚠️",
        SentimentLabel::Neutral => "🔸",
    }
}

/// All report sections in display order, each followed by a blank line.
pub(crate) fn render_outcome(outcome: &AnalysisOutcome, request: &AnalysisRequest) -> String {
    let mut out = render_sentiment(outcome);
    out.push('\n');
    out.push_str(&render_feed(&outcome.feed, &request.industry));
    out.push('\n');
    if let (Some(prices), Some(ticker)) = (&outcome.prices, request.ticker_symbol()) {
        out.push_str(&render_prices(prices, ticker));
        out.push('\n');
    }
    out
}

pub(crate) fn render_sentiment(outcome: &AnalysisOutcome) -> String {
    let mut out = format!("== News sentiment: {} ==\n", outcome.query);
    match (&outcome.news, &outcome.sentiment) {
        (SourceOutcome::Failed(e), _) => {
            let _ = writeln!(out, "⚠️ News search failed: {e}");
        }
        (_, Some(analysis)) => render_analysis(&mut out, analysis),
        (SourceOutcome::Found(_) | SourceOutcome::Empty, None) => {
            out.push_str("⚠️ No news headlines found. Sentiment analysis skipped.\n");
        }
    }
    out
}

fn render_analysis(out: &mut String, analysis: &SentimentAnalysis) {
    match &analysis.report {
        Some(report) => {
            out.push_str(&report.summary);
            out.push('\n');
        }
        None => {
            out.push_str(NO_DATA_MESSAGE);
            out.push('\n');
            return;
        }
    }

    out.push_str("\nHeadlines:\n");
    for (i, (headline, label)) in analysis.results.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>2}. {} {:<8} {headline}",
            i + 1,
            glyph(label),
            label.as_str()
        );
    }

    if !analysis.warnings.is_empty() {
        out.push_str("\nClassification warnings (recorded as Neutral):\n");
        for warning in &analysis.warnings {
            let _ = writeln!(out, "  - {}: {}", warning.headline, warning.error);
        }
    }
}

pub(crate) fn render_feed(feed: &SourceOutcome<FeedItem>, keyword: &str) -> String {
    let mut out = format!("== RSS feed matching \"{keyword}\" ==\n");
    match feed {
        SourceOutcome::Failed(e) => {
            let _ = writeln!(out, "⚠️ Feed unavailable: {e}");
        }
        SourceOutcome::Empty => out.push_str("No matching feed items.\n"),
        SourceOutcome::Found(items) => {
            for item in items {
                let _ = writeln!(out, "- {}", item.title);
                let _ = writeln!(out, "  {}", item.link);
                if let Some(published) = &item.published {
                    let _ = writeln!(out, "  Published: {published}");
                }
            }
        }
    }
    out
}

pub(crate) fn render_prices(prices: &SourceOutcome<PriceBar>, ticker: &str) -> String {
    let mut out = format!("== {} recent prices ==\n", ticker.to_uppercase());
    match prices {
        SourceOutcome::Failed(e) => {
            let _ = writeln!(out, "⚠️ Market data unavailable: {e}");
        }
        SourceOutcome::Empty => out.push_str("No price data returned.\n"),
        SourceOutcome::Found(bars) => {
            out.push_str(&price_table(bars));
            out.push('\n');
            out.push_str(&close_chart(bars));
        }
    }
    out
}

fn price_table(bars: &[PriceBar]) -> String {
    let mut out = format!(
        "{:<12}{:>10}{:>10}{:>10}{:>10}{:>14}\n",
        "DATE", "OPEN", "HIGH", "LOW", "CLOSE", "VOLUME"
    );
    for bar in bars {
        let _ = writeln!(
            out,
            "{:<12}{:>10.2}{:>10.2}{:>10.2}{:>10.2}{:>14}",
            bar.date.to_string(),
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.volume
        );
    }
    out
}

/// One bar per day, scaled between the lowest and highest close.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn close_chart(bars: &[PriceBar]) -> String {
    let min = bars.iter().map(|b| b.close).fold(f64::INFINITY, f64::min);
    let max = bars.iter().map(|b| b.close).fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    let mut out = String::from("Close:\n");
    for bar in bars {
        let len = if span > 0.0 {
            1 + ((bar.close - min) / span * (BAR_WIDTH - 1) as f64).round() as usize
        } else {
            BAR_WIDTH
        };
        let _ = writeln!(
            out,
            "{} {} {:.2}",
            bar.date.format("%m-%d"),
            "█".repeat(len),
            bar.close
        );
    }
    out
}

pub(crate) fn render_footer(config: &AppConfig, prices_requested: bool) -> String {
    let mut providers = vec![
        "SerpAPI Google News".to_string(),
        format!("OpenAI {}", config.openai_model),
        format!("RSS {}", config.rss_feed_url),
    ];
    if prices_requested {
        providers.push("Yahoo Finance".to_string());
    }
    format!("Analysis complete. Data: {}.", providers.join(", "))
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
